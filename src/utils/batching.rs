/// 把序列切分成大小均衡的批次
///
/// 先按目标大小算出批次数 `ceil(N / B)`，再把元素平均分配到各批：
/// 前 `N % 批次数` 批多放一个。这样任意两批的大小最多相差 1，
/// 不会像固定大小切块那样留下一个很小的尾批。
///
/// - 空输入返回空列表
/// - `batch_size` 为 0 时按 1 处理（配置层已拒绝 0）
///
/// # 示例
/// ```
/// # use arxiv_digest::utils::create_balanced_batches;
/// let items: Vec<u32> = (1..=10).collect();
/// let sizes: Vec<usize> = create_balanced_batches(&items, 3).iter().map(|b| b.len()).collect();
/// assert_eq!(sizes, vec![3, 3, 2, 2]);
/// ```
pub fn create_balanced_batches<T>(items: &[T], batch_size: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }

    let batch_size = batch_size.max(1);
    let num_batches = items.len().div_ceil(batch_size);
    let base_size = items.len() / num_batches;
    let extra_items = items.len() % num_batches;

    let mut batches = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base_size + usize::from(i < extra_items);
        batches.push(&items[start..start + size]);
        start += size;
    }

    batches
}
