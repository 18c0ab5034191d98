pub const FEED_LIMIT: i64 = 20;
pub const NOTIFICATION_LIMIT: i64 = 50;
pub const MAX_IMAGES_PER_POST: usize = 4;
pub const MAX_POST_LENGTH: usize = 5000;
pub const PHOTO_PLACEHOLDER: &str = "📷 Photo";
pub const CONTACT_REQUEST_MESSAGE: &str = "Demande de connexion sur Social Immo";
pub const PROFILE_CACHE_TTL: usize = 3600;

pub struct Env {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub database_url: String,
    pub redis_url: String,
    pub storage_url: String,
    pub storage_key: String,
    pub storage_bucket: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub wall_refresh_secs: u64,
    pub chat_refresh_secs: u64,
    pub network_refresh_secs: u64,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");
        let jwt_audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let redis_url = std::env::var("REDIS_URL")
            .expect("REDIS_URL must be set in .env file or environment variable");

        let storage_url = std::env::var("STORAGE_URL")
            .expect("STORAGE_URL must be set in .env file or environment variable");
        let storage_key = std::env::var("STORAGE_KEY")
            .expect("STORAGE_KEY must be set in .env file or environment variable");
        let storage_bucket =
            std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "photos".to_string());

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        let wall_refresh_secs = std::env::var("WALL_REFRESH_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .expect("WALL_REFRESH_SECS must be a valid u64 integer");
        let chat_refresh_secs = std::env::var("CHAT_REFRESH_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .expect("CHAT_REFRESH_SECS must be a valid u64 integer");
        let network_refresh_secs = std::env::var("NETWORK_REFRESH_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .expect("NETWORK_REFRESH_SECS must be a valid u64 integer");

        Env {
            jwt_secret,
            jwt_audience,
            database_url,
            redis_url,
            storage_url,
            storage_key,
            storage_bucket,
            frontend_url,
            ip,
            port,
            wall_refresh_secs,
            chat_refresh_secs,
            network_refresh_secs,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
