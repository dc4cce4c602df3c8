//! Mints an admin token for a principal, signed with the configured secret.
//!
//! ```bash
//! export ADMIN_CONFIG=/etc/daisy/admin.toml
//! daisy-admin-token --username editor --staff --perm blog.view_post
//! ```

use std::collections::HashSet;

use chrono::TimeDelta;
use clap::Parser;
use daisy_admin::{
    auth::{
        auth::{AuthToken, encode_token},
        jwt::JwtKeys,
    },
    config::AdminConfig,
    permission::Principal,
    prelude::*,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "daisy-admin-token")]
#[command(about = "Issue a signed admin token for a principal")]
struct Cli {
    /// Username carried by the token
    #[arg(short, long)]
    username: String,

    /// Principal id, random when omitted
    #[arg(long)]
    id: Option<Uuid>,

    /// Mark the principal as staff
    #[arg(long)]
    staff: bool,

    /// Mark the principal as superuser
    #[arg(long)]
    superuser: bool,

    /// Issue the token for an inactive principal
    #[arg(long)]
    inactive: bool,

    /// Permission codename, may be repeated
    #[arg(short, long = "perm")]
    perms: Vec<String>,

    /// Token lifetime in hours
    #[arg(long, default_value_t = 8)]
    hours: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AdminConfig::from_env()?;
    let keys = JwtKeys::new(config.jwt_secret()?.as_bytes());

    let principal = Principal {
        id: cli.id.unwrap_or_else(Uuid::new_v4),
        username: cli.username,
        is_active: !cli.inactive,
        is_staff: cli.staff,
        is_superuser: cli.superuser,
        permissions: cli.perms.into_iter().collect::<HashSet<_>>(),
    };

    let claims = AuthToken::new(&principal, TimeDelta::hours(cli.hours))?;
    let body = encode_token(&keys, &claims)?;
    println!("{}", body.access_token);
    Ok(())
}
