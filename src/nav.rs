//! Header and sidebar navigation.
//!
//! The panel's menu is a fixed two-level tree. Top-level entries are shown
//! when the user may see at least one of their children; the sidebar lists
//! the children of the module the current path belongs to.

use crate::auth::session::Permissions;

pub struct NavModule {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

pub struct NavSidebarItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

struct NavEntry {
    name: &'static str,
    label: &'static str,
    url: &'static str,
    /// Empty means visible to everyone logged in.
    permission: &'static str,
    parent: &'static str,
}

const fn entry(
    name: &'static str,
    label: &'static str,
    url: &'static str,
    permission: &'static str,
    parent: &'static str,
) -> NavEntry {
    NavEntry { name, label, url, permission, parent }
}

static NAV: &[NavEntry] = &[
    entry("home", "Ana Sayfa", "/panel/mainPage", "", ""),
    entry("content", "İçerik", "/panel/duyurular", "", ""),
    entry("documents", "Belgeler", "/panel/yayinlar", "", ""),
    entry("corporate", "Kurumsal", "/panel/kurumsal/bmvi", "", ""),
    entry("complaints", "Şikayetler", "/panel/sikayetler", "sikayetler.goruntuleme", ""),
    entry("users", "Kullanıcılar", "/panel/users", "kullanicilar.goruntuleme", ""),
    entry("announcements", "Duyurular", "/panel/duyurular", "duyurular.goruntuleme", "content"),
    entry("news", "Haberler", "/panel/haberler", "haberler.goruntuleme", "content"),
    entry("events", "Etkinlikler", "/panel/etkinlikler", "etkinlikler.goruntuleme", "content"),
    entry("services", "Hizmetler", "/panel/hizmetler", "hizmetler.goruntuleme", "content"),
    entry("publications", "Yayınlar", "/panel/yayinlar", "yayinlar.goruntuleme", "documents"),
    entry("reports", "Raporlar", "/panel/raporlar", "raporlar.goruntuleme", "documents"),
    entry("bmvi", "Başkan, Misyon, Vizyon", "/panel/kurumsal/bmvi", "kurumsal.goruntuleme", "corporate"),
    entry("management", "Yönetim Şeması", "/panel/kurumsal/yonetim", "kurumsal.goruntuleme", "corporate"),
    entry("committees", "Komisyonlar", "/panel/kurumsal/komisyonlar", "kurumsal.goruntuleme", "corporate"),
    entry("directorates", "Müdürlükler", "/panel/kurumsal/mudurlukler", "kurumsal.goruntuleme", "corporate"),
    entry("muhtars", "Muhtarlar", "/panel/kurumsal/muhtarlar", "kurumsal.goruntuleme", "corporate"),
];

fn permitted(entry: &NavEntry, permissions: &Permissions) -> bool {
    entry.permission.is_empty() || permissions.has(entry.permission)
}

/// Legacy edit URLs sit outside the tree; map them to the list they belong to.
fn effective_path(current_path: &str) -> &str {
    match current_path.strip_prefix("/panel/edit/") {
        Some(rest) => match rest.split('/').next().unwrap_or("") {
            "event" => "/panel/etkinlikler",
            "news" => "/panel/haberler",
            "service" => "/panel/hizmetler",
            "report" => "/panel/raporlar",
            "publication" => "/panel/yayinlar",
            "management" => "/panel/kurumsal/yonetim",
            _ => "/panel/kurumsal/bmvi",
        },
        None => current_path,
    }
}

pub fn find_navigation(permissions: &Permissions, current_path: &str) -> (Vec<NavModule>, Vec<NavSidebarItem>) {
    let path = effective_path(current_path);
    let top_level: Vec<&NavEntry> = NAV.iter().filter(|e| e.parent.is_empty()).collect();
    let children: Vec<&NavEntry> = NAV.iter().filter(|e| !e.parent.is_empty()).collect();

    let active_module = children
        .iter()
        .find(|c| path.starts_with(c.url))
        .map(|c| c.parent)
        .or_else(|| top_level.iter().find(|t| path.starts_with(t.url)).map(|t| t.name));

    let modules = top_level
        .iter()
        .filter(|t| {
            let kids: Vec<_> = children.iter().filter(|c| c.parent == t.name).collect();
            if kids.is_empty() {
                permitted(t, permissions)
            } else {
                kids.iter().any(|c| permitted(c, permissions))
            }
        })
        .map(|t| NavModule {
            label: t.label.to_string(),
            url: t.url.to_string(),
            is_active: active_module == Some(t.name),
        })
        .collect();

    let sidebar = match active_module {
        Some(module) => {
            let visible: Vec<&&NavEntry> = children
                .iter()
                .filter(|c| c.parent == module && permitted(c, permissions))
                .collect();
            // Longest-prefix match: only the most specific matching URL is active
            let best = visible
                .iter()
                .filter(|c| path.starts_with(c.url))
                .map(|c| c.url.len())
                .max()
                .unwrap_or(0);
            visible
                .into_iter()
                .map(|c| NavSidebarItem {
                    label: c.label.to_string(),
                    url: c.url.to_string(),
                    is_active: c.url.len() == best && path.starts_with(c.url),
                })
                .collect()
        }
        None => vec![],
    };

    (modules, sidebar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(codes: &[&str]) -> Permissions {
        Permissions(codes.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn modules_hidden_without_any_child_permission() {
        let (modules, _) = find_navigation(&perms(&["haberler.goruntuleme"]), "/panel/mainPage");
        let labels: Vec<_> = modules.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Ana Sayfa", "İçerik"]);
    }

    #[test]
    fn sidebar_marks_current_child() {
        let p = perms(&["kurumsal.goruntuleme"]);
        let (modules, sidebar) = find_navigation(&p, "/panel/kurumsal/yonetim");
        assert!(modules.iter().any(|m| m.label == "Kurumsal" && m.is_active));
        let active: Vec<_> = sidebar.iter().filter(|s| s.is_active).map(|s| s.label.as_str()).collect();
        assert_eq!(active, vec!["Yönetim Şeması"]);
    }

    #[test]
    fn edit_pages_highlight_their_list() {
        let p = perms(&["etkinlikler.goruntuleme"]);
        let (_, sidebar) = find_navigation(&p, "/panel/edit/event/3");
        assert!(sidebar.iter().any(|s| s.url == "/panel/etkinlikler" && s.is_active));
    }
}
