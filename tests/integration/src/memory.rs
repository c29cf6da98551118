//! In-memory persistence and identity provider
//!
//! Both honour the same uniqueness rules as the real adapters and can be told
//! to fail at a named point, so compensation paths can be driven from tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use club_core::{
    AccountMetadata, Club, ClubId, ClubRepository, DomainError, EmailQueueRepository,
    IdentityAccount, IdentityProvider, Invite, InviteId, InviteRepository, InviteToken, Member,
    MemberId, MemberProfile, MemberRepository, MemberStatus, QueuedEmail, RepoResult, Role,
    RoleRepository, SessionIdentity, SignUpRequest, User, UserId, UserRepository, UserRole,
};
use parking_lot::Mutex;

/// Places where a failure can be injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    InsertClub,
    DeleteClub,
    InsertUser,
    UpdateUser,
    DeleteUser,
    InsertMember,
    DeleteMember,
    ActivateMember,
    InsertInvite,
    DeleteInvite,
    Enqueue,
    CreateAccount,
    SignUp,
    DeleteAccount,
    SendEmail,
}

#[derive(Default)]
struct Faults(Mutex<HashSet<FailPoint>>);

impl Faults {
    fn set(&self, point: FailPoint) {
        self.0.lock().insert(point);
    }

    fn check(&self, point: FailPoint) -> RepoResult<()> {
        if self.0.lock().contains(&point) {
            Err(DomainError::DatabaseError(format!("injected failure at {point:?}")))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct Tables {
    clubs: Vec<Club>,
    users: Vec<User>,
    members: Vec<Member>,
    invites: Vec<Invite>,
    roles: Vec<Role>,
    outbox: Vec<QueuedEmail>,
}

/// Every table of the lifecycle schema behind one lock
pub struct MemoryStore {
    tables: Mutex<Tables>,
    faults: Faults,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store seeded with the `admin` and `member` roles
    pub fn new() -> Self {
        let store = Self::without_roles();
        {
            let mut tables = store.tables.lock();
            for (id, name) in [(UserRole::Admin, "Administrator"), (UserRole::Member, "Member")] {
                tables.roles.push(Role {
                    id,
                    name: name.to_string(),
                    description: None,
                    permissions: Vec::new(),
                    is_active: true,
                });
            }
        }
        store
    }

    pub fn without_roles() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            faults: Faults::default(),
        }
    }

    pub fn fail(&self, point: FailPoint) {
        self.faults.set(point);
    }

    pub fn clubs(&self) -> Vec<Club> {
        self.tables.lock().clubs.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.tables.lock().users.clone()
    }

    pub fn members(&self) -> Vec<Member> {
        self.tables.lock().members.clone()
    }

    pub fn invites(&self) -> Vec<Invite> {
        self.tables.lock().invites.clone()
    }

    pub fn outbox(&self) -> Vec<QueuedEmail> {
        self.tables.lock().outbox.clone()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.tables.lock().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn member(&self, id: MemberId) -> Option<Member> {
        self.tables.lock().members.iter().find(|m| m.id == id).cloned()
    }

    pub fn invite_for(&self, member_id: MemberId) -> Option<Invite> {
        self.tables
            .lock()
            .invites
            .iter()
            .find(|i| i.member_id == member_id)
            .cloned()
    }

    /// Insert a row directly, bypassing fail points
    pub fn put_user(&self, user: User) {
        self.tables.lock().users.push(user);
    }

    /// Rewrite an invite in place, e.g. to move its expiry
    pub fn edit_invite(&self, id: InviteId, edit: impl FnOnce(&mut Invite)) {
        if let Some(invite) = self.tables.lock().invites.iter_mut().find(|i| i.id == id) {
            edit(invite);
        }
    }

    pub fn edit_member(&self, id: MemberId, edit: impl FnOnce(&mut Member)) {
        if let Some(member) = self.tables.lock().members.iter_mut().find(|m| m.id == id) {
            edit(member);
        }
    }
}

fn same_email(stored: Option<&str>, email: &str) -> bool {
    stored.is_some_and(|s| s.eq_ignore_ascii_case(email.trim()))
}

#[async_trait]
impl ClubRepository for MemoryStore {
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>> {
        Ok(self.tables.lock().clubs.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> RepoResult<Option<Club>> {
        Ok(self
            .tables
            .lock()
            .clubs
            .iter()
            .find(|c| c.subdomain.eq_ignore_ascii_case(subdomain))
            .cloned())
    }

    async fn subdomain_exists(&self, subdomain: &str) -> RepoResult<bool> {
        Ok(ClubRepository::find_by_subdomain(self, subdomain)
            .await?
            .is_some())
    }

    async fn find_by_member_user(&self, user_id: UserId) -> RepoResult<Vec<Club>> {
        let tables = self.tables.lock();
        let club_ids: HashSet<ClubId> = tables
            .members
            .iter()
            .filter(|m| m.user_id == Some(user_id))
            .map(|m| m.club_id)
            .collect();
        Ok(tables
            .clubs
            .iter()
            .filter(|c| club_ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create(&self, club: &Club) -> RepoResult<()> {
        self.faults.check(FailPoint::InsertClub)?;
        let mut tables = self.tables.lock();
        if tables
            .clubs
            .iter()
            .any(|c| c.subdomain.eq_ignore_ascii_case(&club.subdomain))
        {
            return Err(DomainError::SubdomainTaken);
        }
        tables.clubs.push(club.clone());
        Ok(())
    }

    async fn update(&self, club: &Club) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables
            .clubs
            .iter()
            .any(|c| c.id != club.id && c.subdomain.eq_ignore_ascii_case(&club.subdomain))
        {
            return Err(DomainError::SubdomainTaken);
        }
        match tables.clubs.iter_mut().find(|c| c.id == club.id) {
            Some(row) => {
                *row = club.clone();
                Ok(())
            }
            None => Err(DomainError::ClubNotFound(club.id.to_string())),
        }
    }

    async fn delete(&self, id: ClubId) -> RepoResult<()> {
        self.faults.check(FailPoint::DeleteClub)?;
        self.tables.lock().clubs.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .any(|u| same_email(Some(u.email.as_str()), email)))
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.faults.check(FailPoint::InsertUser)?;
        let mut tables = self.tables.lock();
        if tables.users.iter().any(|u| same_email(Some(u.email.as_str()), &user.email)) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        self.faults.check(FailPoint::UpdateUser)?;
        match self.tables.lock().users.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        self.faults.check(FailPoint::DeleteUser)?;
        self.tables.lock().users.retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.member(id))
    }

    async fn find_by_club_and_email(
        &self,
        club_id: ClubId,
        email: &str,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .tables
            .lock()
            .members
            .iter()
            .find(|m| m.club_id == club_id && same_email(m.email.as_deref(), email))
            .cloned())
    }

    async fn find_by_club_and_user(
        &self,
        club_id: ClubId,
        user_id: UserId,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .tables
            .lock()
            .members
            .iter()
            .find(|m| m.club_id == club_id && m.user_id == Some(user_id))
            .cloned())
    }

    async fn find_by_club(&self, club_id: ClubId) -> RepoResult<Vec<Member>> {
        let mut members: Vec<Member> = self
            .tables
            .lock()
            .members
            .iter()
            .filter(|m| m.club_id == club_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(members)
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        self.faults.check(FailPoint::InsertMember)?;
        let mut tables = self.tables.lock();
        if let Some(email) = member.email.as_deref() {
            if let Some(existing) = tables
                .members
                .iter()
                .find(|m| m.club_id == member.club_id && same_email(m.email.as_deref(), email))
            {
                return Err(DomainError::AlreadyMember(existing.membership_status));
            }
        }
        tables.members.push(member.clone());
        Ok(())
    }

    async fn activate(
        &self,
        id: MemberId,
        user_id: UserId,
        profile: Option<&MemberProfile>,
    ) -> RepoResult<Option<Member>> {
        self.faults.check(FailPoint::ActivateMember)?;
        let mut tables = self.tables.lock();
        let Some(row) = tables
            .members
            .iter_mut()
            .find(|m| m.id == id && m.membership_status == MemberStatus::Pending)
        else {
            return Ok(None);
        };

        row.membership_status = MemberStatus::Active;
        row.user_id = Some(user_id);
        if let Some(profile) = profile {
            row.apply_profile(profile.clone());
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: MemberId) -> RepoResult<()> {
        self.faults.check(FailPoint::DeleteMember)?;
        self.tables.lock().members.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl InviteRepository for MemoryStore {
    async fn find_by_token(&self, token: InviteToken) -> RepoResult<Option<Invite>> {
        Ok(self
            .tables
            .lock()
            .invites
            .iter()
            .find(|i| i.token == token)
            .cloned())
    }

    async fn create(&self, invite: &Invite) -> RepoResult<()> {
        self.faults.check(FailPoint::InsertInvite)?;
        self.tables.lock().invites.push(invite.clone());
        Ok(())
    }

    async fn delete(&self, id: InviteId) -> RepoResult<()> {
        self.faults.check(FailPoint::DeleteInvite)?;
        self.tables.lock().invites.retain(|i| i.id != id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        self.faults.check(FailPoint::DeleteInvite)?;
        let mut tables = self.tables.lock();
        let before = tables.invites.len();
        tables.invites.retain(|i| !i.is_expired_at(now));
        Ok((before - tables.invites.len()) as u64)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_id(&self, id: UserRole) -> RepoResult<Option<Role>> {
        Ok(self.tables.lock().roles.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl EmailQueueRepository for MemoryStore {
    async fn enqueue(&self, email: &QueuedEmail) -> RepoResult<()> {
        self.faults.check(FailPoint::Enqueue)?;
        self.tables.lock().outbox.push(email.clone());
        Ok(())
    }
}

// ============================================================================
// Identity provider
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentKind {
    MagicLink,
    Invite,
}

/// An auth email the provider was asked to send
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub kind: SentKind,
    pub email: String,
    pub redirect_url: String,
    pub data: serde_json::Value,
}

#[derive(Default)]
struct Directory {
    accounts: Vec<(IdentityAccount, Option<AccountMetadata>)>,
    deleted: Vec<UserId>,
    sent: Vec<SentEmail>,
    sessions: HashMap<String, SessionIdentity>,
}

/// Identity provider holding accounts and sessions in memory
#[derive(Default)]
pub struct MemoryIdentityProvider {
    directory: Mutex<Directory>,
    faults: Faults,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, point: FailPoint) {
        self.faults.set(point);
    }

    /// Register an account that existed before the test
    pub fn add_account(&self, email: &str) -> IdentityAccount {
        let account = IdentityAccount {
            id: UserId::generate(),
            email: email.to_lowercase(),
        };
        self.directory.lock().accounts.push((account.clone(), None));
        account
    }

    /// Hand out a bearer token that resolves to the given caller
    pub fn issue_session(&self, user_id: UserId, email: &str) -> String {
        let token = format!("session-{}", uuid::Uuid::new_v4());
        self.directory.lock().sessions.insert(
            token.clone(),
            SessionIdentity {
                user_id,
                email: email.to_string(),
            },
        );
        token
    }

    pub fn accounts(&self) -> Vec<IdentityAccount> {
        self.directory
            .lock()
            .accounts
            .iter()
            .map(|(a, _)| a.clone())
            .collect()
    }

    pub fn has_account(&self, id: UserId) -> bool {
        self.directory.lock().accounts.iter().any(|(a, _)| a.id == id)
    }

    pub fn deleted(&self) -> Vec<UserId> {
        self.directory.lock().deleted.clone()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.directory.lock().sent.clone()
    }

    fn insert(&self, email: &str, metadata: &AccountMetadata) -> RepoResult<IdentityAccount> {
        let mut directory = self.directory.lock();
        if directory
            .accounts
            .iter()
            .any(|(a, _)| a.email.eq_ignore_ascii_case(email))
        {
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }
        let account = IdentityAccount {
            id: UserId::generate(),
            email: email.to_lowercase(),
        };
        directory
            .accounts
            .push((account.clone(), Some(metadata.clone())));
        Ok(account)
    }

    fn record(&self, kind: SentKind, email: &str, redirect_url: &str, data: &serde_json::Value) {
        self.directory.lock().sent.push(SentEmail {
            kind,
            email: email.to_string(),
            redirect_url: redirect_url.to_string(),
            data: data.clone(),
        });
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn find_account_by_email(&self, email: &str) -> RepoResult<Option<IdentityAccount>> {
        Ok(self
            .directory
            .lock()
            .accounts
            .iter()
            .find(|(a, _)| a.email.eq_ignore_ascii_case(email.trim()))
            .map(|(a, _)| a.clone()))
    }

    async fn create_account(
        &self,
        email: &str,
        metadata: &AccountMetadata,
        _email_confirmed: bool,
    ) -> RepoResult<IdentityAccount> {
        self.faults.check(FailPoint::CreateAccount)?;
        self.insert(email, metadata)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> RepoResult<IdentityAccount> {
        self.faults.check(FailPoint::SignUp)?;
        self.insert(&request.email, &request.metadata)
    }

    async fn delete_account(&self, id: UserId) -> RepoResult<()> {
        self.faults.check(FailPoint::DeleteAccount)?;
        let mut directory = self.directory.lock();
        directory.accounts.retain(|(a, _)| a.id != id);
        directory.deleted.push(id);
        Ok(())
    }

    async fn send_magic_link(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()> {
        self.faults.check(FailPoint::SendEmail)?;
        self.record(SentKind::MagicLink, email, redirect_url, data);
        Ok(())
    }

    async fn send_invite_email(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()> {
        self.faults.check(FailPoint::SendEmail)?;
        self.record(SentKind::Invite, email, redirect_url, data);
        Ok(())
    }

    async fn authenticate(&self, session_token: &str) -> RepoResult<SessionIdentity> {
        self.directory
            .lock()
            .sessions
            .get(session_token)
            .cloned()
            .ok_or(DomainError::InvalidSession)
    }
}
