use strata_macros::value_object;

/// 可检索文本：统一小写后存储，检索时同样忽略大小写
///
/// ```
/// use strata_domain::value_object::Searchable;
///
/// let s = Searchable::from_texts(["Ada", "Lovelace"]);
/// assert_eq!(s.as_str(), "ada lovelace");
/// assert!(s.search("LOVE"));
/// ```
#[value_object]
pub struct Searchable(String);

impl Searchable {
    pub fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    /// 以空格拼接多段文本
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = texts
            .into_iter()
            .map(|t| t.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn search(&self, needle: &str) -> bool {
        self.0.contains(&needle.to_lowercase())
    }
}
