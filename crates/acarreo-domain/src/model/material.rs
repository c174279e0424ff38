use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,                         // Nombre (Tepetate, Agua, Grava...)
    #[serde(default)]
    pub classification_ref: Option<String>,   // material classification catalog id
}
