use chrono::{Datelike, Utc};

use crate::database::User;
use crate::view::escape;

/// 侧边栏导航项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const INDEX: NavEntry = NavEntry {
    name: "Home",
    href: "Index",
    icon: "fas fa-tachometer-alt",
};

pub const TABLES: NavEntry = NavEntry {
    name: "Tables",
    href: "Tables",
    icon: "fas fa-table",
};

pub const CHARTS: NavEntry = NavEntry {
    name: "Charts",
    href: "Charts",
    icon: "fas fa-chart-pie",
};

/// 导航分组，按顺序显示
pub const NAV_BLOCKS: &[(&str, &[NavEntry])] = &[
    ("Core", &[INDEX]),
    ("Interface", &[TABLES, CHARTS]),
    ("Addons", &[]),
];

/// 页面外框需要的上下文
pub struct PageChrome<'a> {
    pub site_title: &'a str,
    pub page: NavEntry,
    pub user: Option<&'a User>,
}

const STYLESHEETS: &[&str] = &[
    "/css/styles.css",
    "https://cdn.datatables.net/1.10.20/css/dataTables.bootstrap4.min.css",
];

const SCRIPTS: &[&str] = &[
    "https://code.jquery.com/jquery-3.4.1.min.js",
    "https://stackpath.bootstrapcdn.com/bootstrap/4.3.1/js/bootstrap.bundle.min.js",
    "/js/scripts.js",
    "https://cdnjs.cloudflare.com/ajax/libs/Chart.js/2.8.0/Chart.min.js",
    "https://cdn.datatables.net/1.10.20/js/jquery.dataTables.min.js",
    "https://cdn.datatables.net/1.10.20/js/dataTables.bootstrap4.min.js",
];

/// 完整的 HTML 文档，`script` 追加在公共脚本之后
pub fn document(title: &str, body: &str, script: Option<&str>) -> String {
    let stylesheets: String = STYLESHEETS
        .iter()
        .map(|href| format!("<link rel=\"stylesheet\" href=\"{}\" crossorigin=\"anonymous\">", href))
        .collect();
    let scripts: String = SCRIPTS
        .iter()
        .map(|src| format!("<script src=\"{}\" crossorigin=\"anonymous\"></script>", src))
        .collect();

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head>\
         <meta charset=\"UTF-8\">\
         <meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">\
         <title>{title}</title>\
         <link rel=\"icon\" href=\"/assets/img/favicon.png\">\
         {stylesheets}\
         <script src=\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.11.2/js/all.min.js\" crossorigin=\"anonymous\"></script>\
         </head><body class=\"sb-nav-fixed\">{body}{scripts}{script}</body></html>",
        title = escape(title),
        script = script.unwrap_or_default(),
    )
}

/// 带导航外框的页面
pub fn page(chrome: &PageChrome<'_>, content: &str, script: Option<&str>) -> String {
    let body = format!(
        "{top}<div id=\"layoutSidenav\">{side}{main}</div>",
        top = top_nav(chrome.site_title),
        side = side_nav(chrome),
        main = main(chrome, content),
    );

    document(chrome.site_title, &body, script)
}

fn top_nav(site_title: &str) -> String {
    format!(
        "<nav class=\"sb-topnav navbar navbar-expand navbar-dark bg-dark\">\
         <a class=\"navbar-brand\" href=\"/Index\">{title}</a>\
         <button class=\"btn btn-link btn-sm order-1 order-lg-0\" id=\"sidebarToggle\"><i class=\"fas fa-bars\"></i></button>\
         <ul class=\"navbar-nav ml-auto mr-0\"><li class=\"nav-item dropdown\">\
         <a class=\"nav-link dropdown-toggle\" id=\"userDropdown\" href=\"#\" role=\"button\" data-toggle=\"dropdown\" aria-haspopup=\"true\" aria-expanded=\"false\"><i class=\"fas fa-user fa-fw\"></i></a>\
         <div class=\"dropdown-menu dropdown-menu-right\" aria-labelledby=\"userDropdown\">\
         <a class=\"dropdown-item\" href=\"/Login?logout=true\">Logout</a>\
         </div></li></ul></nav>",
        title = escape(site_title),
    )
}

fn side_nav(chrome: &PageChrome<'_>) -> String {
    let mut blocks = String::new();
    for (heading, entries) in NAV_BLOCKS {
        blocks.push_str(&format!(
            "<div class=\"sb-sidenav-menu-heading\">{}</div>",
            heading
        ));
        for entry in entries.iter() {
            let active = if *entry == chrome.page { " active" } else { "" };
            blocks.push_str(&format!(
                "<a class=\"nav-link{active}\" href=\"/{href}\">\
                 <div class=\"sb-nav-link-icon\"><i class=\"{icon}\"></i></div>{name}</a>",
                href = entry.href,
                icon = entry.icon,
                name = entry.name,
            ));
        }
    }

    let user = chrome
        .user
        .map(|u| escape(&u.full_name()))
        .unwrap_or_default();

    format!(
        "<div id=\"layoutSidenav_nav\">\
         <nav class=\"sb-sidenav accordion sb-sidenav-dark\" id=\"sidenavAccordion\">\
         <div class=\"sb-sidenav-menu\"><div class=\"nav\">{blocks}</div></div>\
         <div class=\"sb-sidenav-footer\"><div class=\"small\">Logged in as:</div>{user}</div>\
         </nav></div>"
    )
}

fn main(chrome: &PageChrome<'_>, content: &str) -> String {
    format!(
        "<div id=\"layoutSidenav_content\"><main><div class=\"container-fluid\">\
         <h1 class=\"mt-4\">{name}</h1>\
         <ol class=\"breadcrumb mb-4\"><li class=\"breadcrumb-item active\">{name}</li></ol>\
         <div>{content}</div></div></main>\
         <footer class=\"py-4 bg-light mt-auto\"><div class=\"container-fluid\">\
         <div class=\"d-flex align-items-center justify-content-between small\">\
         <div class=\"text-muted\">Copyright &copy; {title} {year}</div>\
         </div></div></footer></div>",
        name = chrome.page.name,
        title = escape(chrome.site_title),
        year = Utc::now().year(),
    )
}
