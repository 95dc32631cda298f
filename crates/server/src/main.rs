#[tokio::main]
async fn main() -> anyhow::Result<()> {
    abroad_rag_server::start().await
}
