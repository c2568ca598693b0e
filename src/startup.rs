use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::AuthSettings,
    routes::{default_route, student_route, validate_route},
    services::StudentScraper,
};

pub fn run(
    listener: TcpListener,
    auth_settings: AuthSettings,
    scraper: Arc<dyn StudentScraper>,
) -> Result<Server, std::io::Error> {
    let auth_settings = web::Data::new(auth_settings);
    let scraper: web::Data<dyn StudentScraper> = web::Data::from(scraper);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(validate_route::validate)
            .service(student_route::get_student_data)
            .app_data(auth_settings.clone())
            .app_data(scraper.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
