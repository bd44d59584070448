pub mod catalog;
pub mod component;
pub mod job;
pub mod pricing_config;
pub mod quote;
pub mod version;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgId(pub Uuid);
