//! In-memory adapter implementations.
//!
//! Thread-safe, Mutex-backed implementations of every port. Used by unit
//! and integration tests and by local development without external
//! services. Mirrors the persistence contracts exactly, including tenant
//! scoping and the append-only payment store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::billing::{Account, SubscriptionPlan};
use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, MemberId, Timestamp,
};
use crate::domain::roster::{Member, Payment, PaymentWithMember, Phone};
use crate::ports::{
    AccountStore, GatewayError, MemberRepository, NotificationGateway, PaymentRepository,
    Session,
};

/// In-memory account store with password and session tables.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
    passwords: Mutex<HashMap<String, String>>,
    sessions: Mutex<HashMap<String, AccountId>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account directly, bypassing sign-up (for tests).
    pub fn seed(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    /// Replaces a seeded account wholesale (for tests that age a trial).
    pub fn replace_account(&self, account: Account) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(slot) = accounts.iter_mut().find(|a| a.id == account.id) {
            *slot = account;
        } else {
            accounts.push(account);
        }
    }

    /// Opens a session for an account without credentials (for tests).
    pub fn open_session(&self, account_id: AccountId) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), account_id);
        token
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn sign_up(&self, account: &Account, password: &str) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(DomainError::validation(
                "email",
                "An account already exists for this email",
            ));
        }
        accounts.push(account.clone());
        self.passwords
            .lock()
            .unwrap()
            .insert(account.email.clone(), password.to_string());
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let stored = self.passwords.lock().unwrap().get(email).cloned();
        if stored.as_deref() != Some(password) {
            return Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                "Invalid email or password",
            ));
        }
        let account_id = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
            })?;

        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), account_id);
        Ok(Session { token, account_id })
    }

    async fn session(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(token)
            .map(|account_id| Session {
                token: token.to_string(),
                account_id: *account_id,
            }))
    }

    async fn sign_out(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn update_subscription(
        &self,
        id: &AccountId,
        plan: SubscriptionPlan,
        subscribed_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| DomainError::new(ErrorCode::AccountNotFound, "Account not found"))?;
        account.activate_subscription(plan, subscribed_at);
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), DomainError> {
        // Reveals nothing about whether the email exists.
        Ok(())
    }
}

/// In-memory member repository.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn list(&self, owner_id: &AccountId) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        owner_id: &AccountId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| &m.id == id && &m.owner_id == owner_id)
            .cloned())
    }

    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        self.members.lock().unwrap().push(member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.lock().unwrap();
        let slot = members
            .iter_mut()
            .find(|m| m.id == member.id && m.owner_id == member.owner_id)
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
        *slot = member.clone();
        Ok(())
    }

    async fn delete(&self, owner_id: &AccountId, id: &MemberId) -> Result<(), DomainError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(&m.id == id && &m.owner_id == owner_id));
        if members.len() == before {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }
}

/// In-memory payment repository. The member join is resolved at read time
/// against a shared member repository, the way the SQL adapter joins rows.
pub struct InMemoryPaymentRepository {
    payments: Mutex<Vec<Payment>>,
    members: std::sync::Arc<InMemoryMemberRepository>,
}

impl InMemoryPaymentRepository {
    pub fn new(members: std::sync::Arc<InMemoryMemberRepository>) -> Self {
        Self {
            payments: Mutex::new(Vec::new()),
            members,
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn list_with_member(
        &self,
        owner_id: &AccountId,
    ) -> Result<Vec<PaymentWithMember>, DomainError> {
        let payments: Vec<Payment> = self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.owner_id == owner_id)
            .cloned()
            .collect();

        let mut rows = Vec::with_capacity(payments.len());
        for payment in payments {
            let member = self.members.find(owner_id, &payment.member_id).await?;
            rows.push(PaymentWithMember {
                member_name: member.as_ref().map(|m| m.name.clone()),
                member_phone: member.map(|m| m.phone),
                payment,
            });
        }
        rows.sort_by(|a, b| b.payment.recorded_at.cmp(&a.payment.recorded_at));
        Ok(rows)
    }
}

/// Recording notification gateway: captures sends instead of delivering.
#[derive(Default)]
pub struct RecordingNotificationGateway {
    pub whatsapp_sends: Mutex<Vec<(String, String, NaiveDate)>>,
    pub email_sends: Mutex<Vec<(String, String, NaiveDate)>>,
    pub fail_sends: bool,
}

impl RecordingNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotificationGateway {
    async fn send_whatsapp(
        &self,
        phone: &Phone,
        name: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        if self.fail_sends {
            return Err(GatewayError::Unreachable("simulated outage".to_string()));
        }
        self.whatsapp_sends.lock().unwrap().push((
            phone.as_str().to_string(),
            name.to_string(),
            expiry_date,
        ));
        Ok(())
    }

    async fn send_email(
        &self,
        to_name: &str,
        to_email: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        if self.fail_sends {
            return Err(GatewayError::Unreachable("simulated outage".to_string()));
        }
        self.email_sends.lock().unwrap().push((
            to_name.to_string(),
            to_email.to_string(),
            expiry_date,
        ));
        Ok(())
    }
}
