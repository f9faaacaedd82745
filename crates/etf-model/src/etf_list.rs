use crate::EtfInfo;
use serde::Serialize;

/// Ordered, append-only list of scraped records, one per identifier.
///
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EtfList(Vec<EtfInfo>);

impl EtfList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, info: EtfInfo) {
        self.0.push(info);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EtfInfo> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<EtfInfo> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut list = EtfList::with_capacity(2);
        list.push(EtfInfo { title: "first".into(), ..Default::default() });
        list.push(EtfInfo::default());
        let titles: Vec<&str> = list.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", ""]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_serializes_as_array() {
        let list = EtfList::default();
        assert!(list.is_empty());
        assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
    }
}
