use serde::Deserialize;

/// 登录页和受保护页面接受的表单参数，GET 时来自查询串
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginForm {
    pub login: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "return")]
    pub return_to: Option<String>,
    pub logout: Option<String>,
}

impl LoginForm {
    /// 返回 (邮箱, 密码)，任一为空则视为未提交
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let login = self.login.as_deref().filter(|l| !l.is_empty())?;
        let password = self.password.as_deref()?;
        Some((login, password))
    }

    pub fn wants_logout(&self) -> bool {
        self.logout
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// 合并两份参数，`other` 中的值优先
    pub fn merge(self, other: LoginForm) -> LoginForm {
        LoginForm {
            login: other.login.or(self.login),
            password: other.password.or(self.password),
            return_to: other.return_to.or(self.return_to),
            logout: other.logout.or(self.logout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_a_login() {
        let form = LoginForm {
            login: Some(String::new()),
            password: Some("pw".into()),
            ..Default::default()
        };
        assert!(form.credentials().is_none());

        let form = LoginForm {
            login: Some("a@x.com".into()),
            password: Some("pw".into()),
            ..Default::default()
        };
        assert_eq!(form.credentials(), Some(("a@x.com", "pw")));
    }

    #[test]
    fn logout_flag_is_case_insensitive() {
        let form = LoginForm {
            logout: Some("TRUE".into()),
            ..Default::default()
        };
        assert!(form.wants_logout());
        assert!(!LoginForm::default().wants_logout());
    }

    #[test]
    fn merge_prefers_the_second_form() {
        let query = LoginForm {
            return_to: Some("Tables".into()),
            login: Some("old@x.com".into()),
            ..Default::default()
        };
        let body = LoginForm {
            login: Some("new@x.com".into()),
            ..Default::default()
        };

        let merged = query.merge(body);
        assert_eq!(merged.login.as_deref(), Some("new@x.com"));
        assert_eq!(merged.return_to.as_deref(), Some("Tables"));
    }
}
