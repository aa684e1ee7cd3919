pub mod api;

use crate::cli::Args;
use crate::orchestrator::Orchestrator;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    orchestrator: Arc<Orchestrator>,
    args: Args,
}

impl Server {
    pub fn new(addr: String, orchestrator: Arc<Orchestrator>, args: Args) -> Self {
        Self {
            addr,
            orchestrator,
            args,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.orchestrator.clone(), &self.args).await
    }
}
