use crate::{
    config::AdminAccount,
    database::{NewUser, Store},
    error::AppError,
    utils::hash_password,
};

/// 确保管理员账号存在，新建时返回 true
pub async fn provision_admin(store: &dyn Store, admin: &AdminAccount) -> Result<bool, AppError> {
    let users = store.list_users().await?;
    if users.iter().any(|u| u.email == admin.email) {
        tracing::debug!("Admin account {} already exists", admin.email);
        return Ok(false);
    }

    let password = admin.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash admin password: {}", e);
            AppError::InternalServerError
        })?;

    let id = store
        .insert_user(NewUser {
            email: admin.email.clone(),
            firstname: admin.firstname.clone(),
            lastname: admin.lastname.clone(),
            password_hash,
        })
        .await?;
    tracing::info!("Created admin account {} (id {})", admin.email, id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn admin() -> AdminAccount {
        AdminAccount {
            email: "admin@example.com".into(),
            password: "secret".into(),
            firstname: "Ada".into(),
            lastname: "Admin".into(),
        }
    }

    #[tokio::test]
    async fn creates_admin_once() {
        let store = MemoryStore::new();

        assert!(provision_admin(&store, &admin()).await.unwrap());
        assert!(!provision_admin(&store, &admin()).await.unwrap());

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].full_name(), "Ada Admin");
        assert!(crate::utils::verify_password("secret", &users[0].password_hash));
    }
}
