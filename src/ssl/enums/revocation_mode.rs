use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevocationMode {
    #[default]
    NoCheck,
    Online,
    Offline,
}
