use actix_web::{HttpResponse, middleware, web};

use crate::auth;
use crate::errors::not_found_page;
use crate::handlers::{
    announcement_handlers as announcements, auth_handlers, complaint_handlers as complaints,
    content_handlers as content, corporate_handlers as corporate, dashboard,
    directorate_handlers as directorates, document_handlers as documents, edit_handlers as edit,
    muhtar_handlers as muhtars, settings_handlers as settings, upload_handlers, user_handlers as users,
};

/// Every route of the panel. Shared by `main` and the integration tests so
/// both run the same app. `/x/new` is registered before `/x/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        // Root redirect
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/panel/mainPage"))
                    .finish()
            }),
        )
        // Protected routes
        .service(
            web::scope("/panel")
                .wrap(middleware::from_fn(auth::middleware::require_auth))
                .route("", web::get().to(redirect_home))
                .route("/mainPage", web::get().to(dashboard::index))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/settings", web::get().to(settings::show))
                .route("/settings", web::post().to(settings::submit))
                .service(
                    web::resource("/upload")
                        .app_data(web::PayloadConfig::new(upload_handlers::MAX_UPLOAD_BYTES))
                        .route(web::post().to(upload_handlers::upload)),
                )
                // Generic edit page
                .route("/edit/{mode}/{id}", web::get().to(edit::edit_page))
                .route("/edit/{mode}/{id}", web::post().to(edit::edit_submit))
                // Announcements
                .route("/duyurular", web::get().to(announcements::list))
                .route("/duyurular/new", web::get().to(announcements::new_form))
                .route("/duyurular", web::post().to(announcements::create))
                .route("/duyurular/bulk", web::post().to(announcements::bulk))
                .route("/duyurular/{id}/edit", web::get().to(announcements::edit_form))
                .route("/duyurular/{id}", web::post().to(announcements::update))
                .route("/duyurular/{id}/delete", web::post().to(announcements::delete))
                // Complaints
                .route("/sikayetler", web::get().to(complaints::list))
                .route("/sikayetler/new", web::get().to(complaints::new_form))
                .route("/sikayetler", web::post().to(complaints::create))
                .route("/sikayetler/bulk", web::post().to(complaints::bulk))
                .route("/sikayetler/{id}", web::get().to(complaints::detail))
                .route("/sikayetler/{id}/edit", web::get().to(complaints::edit_form))
                .route("/sikayetler/{id}", web::post().to(complaints::update))
                .route("/sikayetler/{id}/reply", web::post().to(complaints::reply))
                .route("/sikayetler/{id}/status", web::post().to(complaints::update_status))
                .route("/sikayetler/{id}/priority", web::post().to(complaints::update_priority))
                .route("/sikayetler/{id}/delete", web::post().to(complaints::delete))
                // News
                .route("/haberler", web::get().to(content::news_list))
                .route("/haberler/new", web::get().to(content::news_new))
                .route("/haberler", web::post().to(content::news_create))
                .route("/haberler/bulk", web::post().to(content::news_bulk))
                .route("/haberler/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/haberler/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/haberler/{id}/delete", web::post().to(content::news_delete))
                // Events
                .route("/etkinlikler", web::get().to(content::event_list))
                .route("/etkinlikler/new", web::get().to(content::event_new))
                .route("/etkinlikler", web::post().to(content::event_create))
                .route("/etkinlikler/bulk", web::post().to(content::event_bulk))
                .route("/etkinlikler/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/etkinlikler/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/etkinlikler/{id}/delete", web::post().to(content::event_delete))
                // City services
                .route("/hizmetler", web::get().to(content::service_list))
                .route("/hizmetler/new", web::get().to(content::service_new))
                .route("/hizmetler", web::post().to(content::service_create))
                .route("/hizmetler/bulk", web::post().to(content::service_bulk))
                .route("/hizmetler/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/hizmetler/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/hizmetler/{id}/delete", web::post().to(content::service_delete))
                // Publications
                .route("/yayinlar", web::get().to(documents::publication_list))
                .route("/yayinlar/new", web::get().to(documents::publication_new))
                .route("/yayinlar", web::post().to(documents::publication_create))
                .route("/yayinlar/bulk", web::post().to(documents::publication_bulk))
                .route("/yayinlar/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/yayinlar/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/yayinlar/{id}/delete", web::post().to(documents::publication_delete))
                // Reports
                .route("/raporlar", web::get().to(documents::report_list))
                .route("/raporlar/new", web::get().to(documents::report_new))
                .route("/raporlar", web::post().to(documents::report_create))
                .route("/raporlar/bulk", web::post().to(documents::report_bulk))
                .route("/raporlar/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/raporlar/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/raporlar/{id}/delete", web::post().to(documents::report_delete))
                // Corporate: management before the catch-all category route
                .route("/kurumsal/bmvi", web::get().to(corporate::overview))
                .route("/kurumsal/komisyonlar", web::get().to(corporate::committee_list))
                .route("/kurumsal/yonetim", web::get().to(corporate::roster_list))
                .route("/kurumsal/yonetim/bulk", web::post().to(corporate::roster_bulk))
                .route("/kurumsal/yonetim/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/kurumsal/yonetim/{id}/duzenle", web::get().to(edit::legacy_redirect))
                .route("/kurumsal/yonetim/{id}/delete", web::post().to(corporate::roster_delete))
                // Directorates
                .route("/kurumsal/mudurlukler", web::get().to(directorates::list))
                .route("/kurumsal/mudurlukler/new", web::get().to(directorates::new_form))
                .route("/kurumsal/mudurlukler", web::post().to(directorates::create))
                .route("/kurumsal/mudurlukler/bulk", web::post().to(directorates::bulk))
                .route("/kurumsal/mudurlukler/{id}/edit", web::get().to(directorates::edit_form))
                .route("/kurumsal/mudurlukler/{id}", web::post().to(directorates::update))
                .route("/kurumsal/mudurlukler/{id}/delete", web::post().to(directorates::delete))
                // Neighbourhood heads
                .route("/kurumsal/muhtarlar", web::get().to(muhtars::list))
                .route("/kurumsal/muhtarlar/new", web::get().to(muhtars::new_form))
                .route("/kurumsal/muhtarlar", web::post().to(muhtars::create))
                .route("/kurumsal/muhtarlar/bulk", web::post().to(muhtars::bulk))
                .route("/kurumsal/muhtarlar/{id}/edit", web::get().to(muhtars::edit_form))
                .route("/kurumsal/muhtarlar/{id}", web::post().to(muhtars::update))
                .route("/kurumsal/muhtarlar/{id}/delete", web::post().to(muhtars::delete))
                .route("/kurumsal/{category}/{id}/edit", web::get().to(edit::legacy_redirect))
                .route("/kurumsal/{category}/{id}/duzenle", web::get().to(edit::legacy_redirect))
                // Users
                .route("/users", web::get().to(users::list))
                .route("/users/new", web::get().to(users::new_form))
                .route("/users", web::post().to(users::create))
                .route("/users/{id}/edit", web::get().to(users::edit_form))
                .route("/users/{id}", web::post().to(users::update))
                .route("/users/{id}/delete", web::post().to(users::delete)),
        )
        // Default 404 handler (must be registered last)
        .default_service(web::to(|| async { not_found_page() }));
}

async fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/panel/mainPage"))
        .finish()
}
