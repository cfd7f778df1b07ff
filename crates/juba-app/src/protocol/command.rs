#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Health,
    List,
    Translate,
    Create,
    Update,
    Delete,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "health" => Command::Health,
            "dictionary.list" => Command::List,
            "dictionary.translate" => Command::Translate,
            "dictionary.create" => Command::Create,
            "dictionary.update" => Command::Update,
            "dictionary.delete" => Command::Delete,
            _ => Command::Unknown,
        }
    }
}
