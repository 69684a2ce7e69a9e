use crate::error::ValidationError;
use crate::models::paper::PaperRecord;
use serde_json::{Map, Value as JsonValue};

/// 摘要中必须存在且非空的字段
pub const REQUIRED_FIELDS: [&str; 2] = ["motivation", "method"];

/// 附加到摘要末尾的原文摘要字段名
pub const ABSTRACT_FIELD: &str = "abstract";

/// 一篇论文的结构化摘要
///
/// 字段保持 LLM 返回时的顺序（报告按此顺序输出小节），
/// 只能通过 [`PaperSummary::from_fields`] 构造，因此 `motivation` 和 `method` 一定非空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperSummary {
    fields: Vec<(String, String)>,
}

impl PaperSummary {
    /// 校验并构造摘要
    ///
    /// `index` 为该摘要在批次中的位置，只用于错误信息。
    pub fn from_fields(
        index: usize,
        fields: Vec<(String, String)>,
    ) -> Result<Self, ValidationError> {
        for field in REQUIRED_FIELDS {
            match fields.iter().find(|(name, _)| name == field) {
                None => return Err(ValidationError::MissingField { index, field }),
                Some((_, text)) if text.trim().is_empty() => {
                    return Err(ValidationError::EmptyField { index, field })
                }
                Some(_) => {}
            }
        }
        Ok(Self { fields })
    }

    /// 从 JSON 对象构造；非字符串的值返回 `Err(字段名)`
    pub fn fields_from_object(object: Map<String, JsonValue>) -> Result<Vec<(String, String)>, String> {
        object
            .into_iter()
            .map(|(name, value)| match value {
                JsonValue::String(text) => Ok((name, text)),
                _ => Err(name),
            })
            .collect()
    }

    pub fn motivation(&self) -> &str {
        self.get("motivation").unwrap_or_default()
    }

    pub fn method(&self) -> &str {
        self.get("method").unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, text)| text.as_str())
    }

    /// 按顺序遍历所有字段
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, text)| (name.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 返回追加（或覆盖）一个字段后的新摘要
    ///
    /// 已存在同名字段时在原位置替换，否则追加到末尾。
    pub fn with_field(&self, name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let text = text.into();
        let mut fields = self.fields.clone();
        match fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = text,
            None => fields.push((name, text)),
        }
        Self { fields }
    }
}

/// 报告中的一条记录：论文 + 附带原文摘要的结构化摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub paper: PaperRecord,
    pub summary: PaperSummary,
}

impl ReportEntry {
    pub fn new(paper: PaperRecord, summary: &PaperSummary) -> Self {
        let summary = summary.with_field(ABSTRACT_FIELD, paper.summary.clone());
        Self { paper, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_fields_valid() {
        let summary = PaperSummary::from_fields(
            0,
            fields(&[("motivation", "why"), ("method", "how"), ("result", "what")]),
        )
        .unwrap();

        assert_eq!(summary.motivation(), "why");
        assert_eq!(summary.method(), "how");
        assert_eq!(summary.get("result"), Some("what"));
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_from_fields_missing_method() {
        let err = PaperSummary::from_fields(2, fields(&[("motivation", "why")])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                index: 2,
                field: "method"
            }
        );
    }

    #[test]
    fn test_from_fields_empty_motivation() {
        let err =
            PaperSummary::from_fields(0, fields(&[("motivation", "  "), ("method", "how")]))
                .unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                index: 0,
                field: "motivation"
            }
        );
    }

    #[test]
    fn test_fields_from_object_keeps_order() {
        let object = json!({"method": "m", "motivation": "w", "extra": "e"});
        let JsonValue::Object(map) = object else {
            panic!("not an object");
        };

        let pairs = PaperSummary::fields_from_object(map).unwrap();
        let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["method", "motivation", "extra"]);
    }

    #[test]
    fn test_fields_from_object_rejects_non_string() {
        let JsonValue::Object(map) = json!({"motivation": "w", "method": 3}) else {
            panic!("not an object");
        };
        assert_eq!(PaperSummary::fields_from_object(map), Err("method".to_string()));
    }

    #[test]
    fn test_with_field_appends_and_replaces() {
        let summary =
            PaperSummary::from_fields(0, fields(&[("motivation", "w"), ("method", "m")])).unwrap();

        let extended = summary.with_field("abstract", "a");
        let names: Vec<&str> = extended.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["motivation", "method", "abstract"]);
        // 原记录不变
        assert_eq!(summary.len(), 2);

        let replaced = extended.with_field("motivation", "w2");
        assert_eq!(replaced.motivation(), "w2");
        assert_eq!(replaced.fields().next(), Some(("motivation", "w2")));
    }
}
