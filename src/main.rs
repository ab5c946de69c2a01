use movie_club::config::ServerConfig;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let _rocket = movie_club::build(config).launch().await?;
    Ok(())
}
