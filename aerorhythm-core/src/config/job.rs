use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Job {
    /// Fail jobs interrupted by a previous process and dispatch leftover pending ones.
    #[serde(default = "default_recover_on_startup")]
    pub recover_on_startup: bool,

    #[serde(default = "default_max_error_message_length")]
    pub max_error_message_length: usize,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            recover_on_startup: default_recover_on_startup(),
            max_error_message_length: default_max_error_message_length(),
        }
    }
}

fn default_recover_on_startup() -> bool {
    true
}

fn default_max_error_message_length() -> usize {
    1024
}
