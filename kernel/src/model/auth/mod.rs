pub mod command;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
