/// Ordered, blank-free list of source URLs taken from one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceList(Vec<String>);

impl SourceList {
    /// Drops blank entries; surviving entries keep their submitted order.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = raw
            .into_iter()
            .filter_map(|v| {
                let trimmed = v.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        SourceList(urls)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_are_skipped_and_order_kept() {
        let list = SourceList::from_raw(["", "a", "", "b"]);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let list = SourceList::from_raw(["  ", "\t"]);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
