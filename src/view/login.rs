use crate::view::{escape, layout::document};

/// 登录页，表单提交到登录后要访问的页面
pub fn login_page(site_title: &str, action: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<div class=\"alert alert-danger\">{}</div>", escape(e)))
        .unwrap_or_default();

    let body = format!(
        "<div id=\"formContent\" class=\"centerDiv\">\
         <div style=\"margin-top:50px\"><i class=\"fas fa-user\"></i></div>\
         {error}\
         <form method=\"post\" action=\"/{action}\">\
         <input type=\"text\" id=\"login\" name=\"login\" placeholder=\"Login\">\
         <input type=\"password\" id=\"password\" name=\"password\" placeholder=\"Password\">\
         <input type=\"submit\" value=\"Login\">\
         </form>\
         <div id=\"formFooter\"><a href=\"#\">Forgot password?</a></div>\
         </div>",
        action = escape(action),
    );

    document(site_title, &body, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_posts_to_the_return_page() {
        let html = login_page("Dashboard", "Tables", None);
        assert!(html.contains("<form method=\"post\" action=\"/Tables\">"));
        assert!(html.contains("name=\"login\""));
        assert!(html.contains("name=\"password\""));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn error_message_is_escaped() {
        let html = login_page("Dashboard", "Index", Some("<b>bad</b>"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
    }
}
