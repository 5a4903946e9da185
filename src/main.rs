use tracing::{info, warn};

use usermgmt::auth::Resettable;
use usermgmt::config::AppConfig;
use usermgmt::users::dto::RawUserInput;
use usermgmt::users::input::{process_user_input, HtmlSanitizer};
use usermgmt::users::services::{filter_by_role, index_by_email, make_searcher, summarize};
use usermgmt::users::{instance_count, AdminUser, CustomerUser, MembershipLevel, Role, User};
use usermgmt::AppState;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    if config.log.json {
        tracing_subscriber::fmt()
            .with_env_filter(config.log.filter.as_str())
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(config.log.filter.as_str())
            .init();
    }

    if !config.run_demo {
        info!("demo disabled");
        return Ok(());
    }

    run_demo(AppState::init())
}

fn run_demo(state: AppState) -> anyhow::Result<()> {
    let mut alice = AdminUser::new(state.clone(), "Alice Admin", "alice@example.com", true)?;
    let bob = AdminUser::new(state.clone(), "Bob Manager", "bob@example.com", false)?;
    let mut charlie = CustomerUser::new(
        state.clone(),
        "Charlie Customer",
        "charlie@example.com",
        MembershipLevel::Premium,
    )?;
    let mut diana = CustomerUser::new(
        state.clone(),
        "Diana User",
        "diana@example.com",
        MembershipLevel::default(),
    )?;
    let eve = CustomerUser::new(state.clone(), "Eve VIP", "eve@example.com", MembershipLevel::Vip)?;
    info!(total = instance_count(), "users created");

    alice.set_attribute("department", "Engineering");
    charlie.set_attribute("loyalty_points", 2500);
    info!(
        department = ?alice.attribute("department"),
        loyalty_points = ?charlie.attribute("loyalty_points"),
        missing = ?alice.attribute("non_existent"),
        "extra attributes"
    );

    if alice.login("alice@example.com", "securePassword123") {
        info!(user = %alice.name(), last_login_at = ?alice.last_login_at(), "login ok");
    }
    if !alice.login("wrong@example.com", "password") {
        warn!(user = %alice.name(), "login with wrong email refused");
    }
    alice.logout();

    let short = diana.reset_password("short");
    let long = diana.reset_password("longEnoughPassword");
    info!(short, long, has_password = diana.has_password(), "password resets");

    if let Err(e) = diana.upgrade_membership("platinum") {
        warn!(error = %e, "upgrade refused");
    }
    diana.upgrade_membership("vip")?;
    info!(promotion = %alice.promote_user(&diana), "promotion");

    if let Err(e) = AdminUser::new(state, "Mallory", "not-an-email", false) {
        warn!(error = %e, "construction refused");
    }

    let users: Vec<User> = vec![
        alice.into(),
        bob.into(),
        charlie.into(),
        diana.into(),
        eve.into(),
    ];

    for line in summarize(&users) {
        info!("{line}");
    }
    for admin in filter_by_role(&users, Role::Admin) {
        info!(admin = %admin, "admin");
    }

    let search = make_searcher(&users);
    for term in ["admin", "VIP", "nobody"] {
        let found: Vec<&str> = search(term).iter().map(|u| u.name()).collect();
        info!(term, ?found, "search");
    }

    let index = index_by_email(&users);
    if let Some(user) = index.get("eve@example.com") {
        let record = serde_json::to_string(&user.to_record())?;
        info!(%record, "lookup by email");
    }

    let input = process_user_input(
        RawUserInput {
            name: Some(r#"  <script>alert("xss")</script>  "#.into()),
            email: Some(" test@example.com ".into()),
            role: None,
        },
        &HtmlSanitizer,
    );
    info!(?input, "sanitized input");

    Ok(())
}
