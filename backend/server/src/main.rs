#[tokio::main]
async fn main() -> anyhow::Result<()> {
    recipes::start_server().await
}
