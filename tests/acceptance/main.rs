use cucumber::World;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

#[derive(Default, World)]
pub struct CliWorld {
    pub server: Option<MockServer>,
    pub home: Option<TempDir>,
    pub confirm_answer: Option<bool>,
    pub captured_output: Vec<u8>,
    pub command_result: Option<anyhow::Result<()>>,
}

impl std::fmt::Debug for CliWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliWorld")
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("config_path", &self.home.as_ref().map(|_| self.config_path()))
            .field("captured_output", &String::from_utf8_lossy(&self.captured_output))
            .field("command_result", &self.command_result)
            .finish()
    }
}

impl CliWorld {
    pub fn server(&self) -> &MockServer {
        self.server
            .as_ref()
            .expect("the mock GitHub API should be started in the Background")
    }

    pub fn config_path(&self) -> PathBuf {
        self.home
            .as_ref()
            .expect("the config directory should be created in the Background")
            .path()
            .join(".and-cli")
            .join("config")
    }
}

#[tokio::main]
async fn main() {
    CliWorld::run("features").await;
}

mod steps;
