use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::{services::is_valid_email, session::Session, Resettable, MIN_PASSWORD_LEN};
use crate::error::{UserError, UserResult};
use crate::state::AppState;
use crate::users::dto::UserRecord;

static INSTANCE_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Number of users successfully constructed since start-up or the last reset.
pub fn instance_count() -> usize {
    INSTANCE_COUNT.load(Ordering::SeqCst)
}

/// Sets the construction counter back to zero. Meant for test isolation.
pub fn reset_instance_count() {
    INSTANCE_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    /// `Admin` / `Customer`, as shown in user summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Customer => "Customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Write,
    Delete,
    ManageUsers,
    ManageAdmins,
    SystemSettings,
    ViewProfile,
    PrioritySupport,
    ExclusiveContent,
    WriteReviews,
    EarlyAccess,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Delete => "delete",
            Permission::ManageUsers => "manage_users",
            Permission::ManageAdmins => "manage_admins",
            Permission::SystemSettings => "system_settings",
            Permission::ViewProfile => "view_profile",
            Permission::PrioritySupport => "priority_support",
            Permission::ExclusiveContent => "exclusive_content",
            Permission::WriteReviews => "write_reviews",
            Permission::EarlyAccess => "early_access",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipLevel {
    #[default]
    Basic,
    Premium,
    Vip,
}

impl MembershipLevel {
    pub const ALL: [MembershipLevel; 3] = [
        MembershipLevel::Basic,
        MembershipLevel::Premium,
        MembershipLevel::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipLevel::Basic => "basic",
            MembershipLevel::Premium => "premium",
            MembershipLevel::Vip => "vip",
        }
    }
}

impl fmt::Display for MembershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipLevel {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|l| l.as_str()).collect();
                UserError::InvalidArgument(format!(
                    "Invalid membership level: '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// State shared by every kind of user: identity, password, session and
/// free-form attributes.
#[derive(Debug)]
pub struct UserBase {
    name: String,
    email: String,
    role: Role,
    password_hash: Option<String>,
    attributes: HashMap<String, Value>,
    session: Session,
    deps: AppState,
}

impl UserBase {
    pub fn new(
        deps: AppState,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> UserResult<Self> {
        let name = name.into();
        let email = email.into();
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(UserError::InvalidFormat(email));
        }

        INSTANCE_COUNT.fetch_add(1, Ordering::SeqCst);
        debug!(name = %name, email = %email, role = %role, "user constructed");
        Ok(Self {
            name,
            email,
            role,
            password_hash: None,
            attributes: HashMap::new(),
            session: Session::new(),
            deps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> UserResult<()> {
        let email = email.into();
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(UserError::InvalidFormat(email));
        }
        self.email = email;
        Ok(())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Extra attribute stored under `key`, `None` if it was never set.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        debug!(key = %key, "attribute set");
        self.attributes.insert(key, value.into());
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// Placeholder credential check: the email must be this user's own and
    /// the password non-empty. Nothing changes on failure.
    #[instrument(skip(self, password), fields(user = %self.email))]
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email != self.email {
            warn!("login email mismatch");
            return false;
        }
        if password.is_empty() {
            warn!("login with empty password");
            return false;
        }
        self.session.open(self.deps.clock.as_ref());
        info!(last_login_at = ?self.session.last_login_at(), "user logged in");
        true
    }

    pub fn logout(&mut self) {
        self.session.close();
        info!(user = %self.email, "user logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn last_login_at(&self) -> Option<&str> {
        self.session.last_login_at()
    }
}

impl Resettable for UserBase {
    #[instrument(skip(self, new_password), fields(user = %self.email))]
    fn reset_password(&mut self, new_password: &str) -> bool {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            warn!("password too short");
            return false;
        }
        match self.deps.hasher.hash_password(new_password) {
            Ok(hash) => {
                self.password_hash = Some(hash);
                info!("password reset");
                true
            }
            Err(e) => {
                error!(error = %e, "hash_password failed");
                false
            }
        }
    }
}

impl fmt::Display for UserBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.role.title(), self.name, self.email)
    }
}

#[derive(Debug)]
pub struct AdminUser {
    base: UserBase,
    super_admin: bool,
}

impl AdminUser {
    pub fn new(
        deps: AppState,
        name: impl Into<String>,
        email: impl Into<String>,
        super_admin: bool,
    ) -> UserResult<Self> {
        let base = UserBase::new(deps, name, email, Role::Admin)?;
        Ok(Self { base, super_admin })
    }

    pub fn is_super_admin(&self) -> bool {
        self.super_admin
    }

    pub fn permissions(&self) -> Vec<Permission> {
        let mut permissions = vec![
            Permission::Read,
            Permission::Write,
            Permission::Delete,
            Permission::ManageUsers,
        ];
        if self.super_admin {
            permissions.extend([Permission::ManageAdmins, Permission::SystemSettings]);
        }
        permissions
    }

    pub fn promote_user(&self, user: &UserBase) -> String {
        format!(
            "{} has been promoted by admin {}.",
            user.name(),
            self.base.name()
        )
    }
}

#[derive(Debug)]
pub struct CustomerUser {
    base: UserBase,
    membership: MembershipLevel,
}

impl CustomerUser {
    pub fn new(
        deps: AppState,
        name: impl Into<String>,
        email: impl Into<String>,
        membership: MembershipLevel,
    ) -> UserResult<Self> {
        let base = UserBase::new(deps, name, email, Role::Customer)?;
        Ok(Self { base, membership })
    }

    pub fn membership_level(&self) -> MembershipLevel {
        self.membership
    }

    /// VIP members also receive every premium permission.
    pub fn permissions(&self) -> Vec<Permission> {
        let mut permissions = vec![Permission::Read, Permission::ViewProfile];
        if self.membership == MembershipLevel::Vip {
            permissions.extend([Permission::PrioritySupport, Permission::ExclusiveContent]);
        }
        if matches!(self.membership, MembershipLevel::Vip | MembershipLevel::Premium) {
            permissions.extend([Permission::WriteReviews, Permission::EarlyAccess]);
        }
        permissions
    }

    /// Moves to any valid level, downgrades included.
    pub fn upgrade_membership(&mut self, level: &str) -> UserResult<()> {
        let level = level.parse::<MembershipLevel>().map_err(|e| {
            warn!(user = %self.base.email(), requested = %level, "invalid membership level");
            e
        })?;
        info!(user = %self.base.email(), from = %self.membership, to = %level, "membership changed");
        self.membership = level;
        Ok(())
    }
}

/// Either kind of user, for code that handles them uniformly.
#[derive(Debug)]
pub enum User {
    Admin(AdminUser),
    Customer(CustomerUser),
}

impl User {
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            User::Admin(admin) => admin.permissions(),
            User::Customer(customer) => customer.permissions(),
        }
    }

    pub fn as_admin(&self) -> Option<&AdminUser> {
        match self {
            User::Admin(admin) => Some(admin),
            User::Customer(_) => None,
        }
    }

    pub fn as_customer(&self) -> Option<&CustomerUser> {
        match self {
            User::Customer(customer) => Some(customer),
            User::Admin(_) => None,
        }
    }

    pub fn as_customer_mut(&mut self) -> Option<&mut CustomerUser> {
        match self {
            User::Customer(customer) => Some(customer),
            User::Admin(_) => None,
        }
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            name: self.name().to_string(),
            email: self.email().to_string(),
            role: self.role(),
            permissions: self.permissions(),
            logged_in: self.is_logged_in(),
        }
    }
}

impl From<AdminUser> for User {
    fn from(admin: AdminUser) -> Self {
        User::Admin(admin)
    }
}

impl From<CustomerUser> for User {
    fn from(customer: CustomerUser) -> Self {
        User::Customer(customer)
    }
}

impl Deref for AdminUser {
    type Target = UserBase;
    fn deref(&self) -> &UserBase {
        &self.base
    }
}

impl DerefMut for AdminUser {
    fn deref_mut(&mut self) -> &mut UserBase {
        &mut self.base
    }
}

impl Deref for CustomerUser {
    type Target = UserBase;
    fn deref(&self) -> &UserBase {
        &self.base
    }
}

impl DerefMut for CustomerUser {
    fn deref_mut(&mut self) -> &mut UserBase {
        &mut self.base
    }
}

impl Deref for User {
    type Target = UserBase;
    fn deref(&self) -> &UserBase {
        match self {
            User::Admin(admin) => &admin.base,
            User::Customer(customer) => &customer.base,
        }
    }
}

impl DerefMut for User {
    fn deref_mut(&mut self) -> &mut UserBase {
        match self {
            User::Admin(admin) => &mut admin.base,
            User::Customer(customer) => &mut customer.base,
        }
    }
}

impl Resettable for AdminUser {
    fn reset_password(&mut self, new_password: &str) -> bool {
        self.base.reset_password(new_password)
    }
}

impl Resettable for CustomerUser {
    fn reset_password(&mut self, new_password: &str) -> bool {
        self.base.reset_password(new_password)
    }
}

impl Resettable for User {
    fn reset_password(&mut self, new_password: &str) -> bool {
        (**self).reset_password(new_password)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
