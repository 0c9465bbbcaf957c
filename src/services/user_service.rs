use sea_orm::TransactionTrait;

use crate::{
    dto::users::{CreateUserRequest, DemoLoginRequest, DemoLoginResponse},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{CartStore, NewUser, OrmStore, UserStore},
};

const PLACEHOLDER_PASSWORD_HASH: &str = "dummy";
const DEMO_PASSWORD_HASH: &str = "demo_hash";

/// Inserts the user together with the user's empty cart.
pub async fn register<S>(store: &S, new_user: NewUser) -> AppResult<User>
where
    S: UserStore + CartStore,
{
    let user = store.insert_user(new_user).await?;
    store.insert_cart(user.id).await?;
    Ok(user)
}

/// Account fields for a demo user: the email's local part becomes the name.
pub fn demo_account(email: &str) -> NewUser {
    let local = email.split('@').next().unwrap_or(email);
    NewUser {
        name: local.to_string(),
        email: email.to_string(),
        full_name: Some(format!("Demo {local}")),
        password_hash: DEMO_PASSWORD_HASH.to_string(),
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let new_user = NewUser {
        name: required(&payload.name, "name")?,
        email: required(&payload.email, "email")?,
        full_name: None,
        password_hash: PLACEHOLDER_PASSWORD_HASH.to_string(),
    };

    let txn = state.orm.begin().await?;
    let user = register(&OrmStore::new(&txn), new_user)
        .await
        .map_err(|err| match err {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
            other => other,
        })?;
    txn.commit().await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(ApiResponse::success("User created", user, Some(Meta::empty())))
}

/// Returns the account for `email`, creating it (and its cart) when absent.
pub async fn demo_login(
    state: &AppState,
    payload: DemoLoginRequest,
) -> AppResult<DemoLoginResponse> {
    let email = required(&payload.email, "email")?;
    let store = OrmStore::new(&state.orm);

    if let Some(user) = store.user_by_email(&email).await? {
        return Ok(demo_response(user, false));
    }

    let txn = state.orm.begin().await?;
    let result = register(&OrmStore::new(&txn), demo_account(&email)).await;
    match result {
        Ok(user) => {
            txn.commit().await?;
            tracing::info!(user_id = user.id, "demo user created");
            Ok(demo_response(user, true))
        }
        // A concurrent login created the account first.
        Err(AppError::Conflict(_)) => {
            txn.rollback().await?;
            let user = store
                .user_by_email(&email)
                .await?
                .ok_or(AppError::NotFound("User"))?;
            Ok(demo_response(user, false))
        }
        Err(err) => Err(err),
    }
}

fn demo_response(user: User, created: bool) -> DemoLoginResponse {
    let message = if created {
        "New demo user created"
    } else {
        "Demo user retrieved"
    };
    DemoLoginResponse {
        message: message.to_string(),
        user,
        created,
    }
}
