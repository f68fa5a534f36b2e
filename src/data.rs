use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Data {
    pub network: Network,
}

#[derive(Debug, Deserialize)]
pub struct Network {
    pub name: String,
    pub source: u32,
    pub transit: u32,
    pub dest: u32,
    #[serde(default = "default_paths")]
    pub paths: u32,
}

fn default_paths() -> u32 {
    3
}

impl Default for Network {
    fn default() -> Self {
        Self {
            name: "3x3x3".into(),
            source: 3,
            transit: 3,
            dest: 3,
            paths: 3,
        }
    }
}
