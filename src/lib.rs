pub mod cli;
pub mod error;
pub mod llm;
pub mod models;
pub mod orchestrator;
pub mod server;

use cli::Args;
use log::info;
use orchestrator::Orchestrator;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("adapter default"));
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("adapter default"));
    info!("System Prompt: {}", if args.system_prompt.is_some() { "set" } else { "none" });
    info!("CORS Enabled: {}", args.enable_cors);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let orchestrator = Arc::new(Orchestrator::from_args(&args)?);
    let addr = args.server_addr.clone();
    let server = Server::new(addr, orchestrator, args);
    server.run().await?;

    Ok(())
}
