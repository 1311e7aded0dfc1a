#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextViewModel {
    pub document: String,
    pub notification: Option<String>,
    pub busy: bool,
    pub dirty: bool,
}
