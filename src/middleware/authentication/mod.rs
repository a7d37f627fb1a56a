mod extract;
mod manager;
mod manager_middleware;
mod method;

pub use extract::*;
pub use manager::*;
pub use manager_middleware::*;

use actix_web::dev::ServiceRequest;
use actix_web::http::header::HeaderName;
use std::str::FromStr;

fn get_header<T>(req: &ServiceRequest, header_name: &'static str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    let header_value = req.headers().get(HeaderName::from_static(header_name));

    let Some(header_value) = header_value else {
        return Ok(None);
    };

    header_value
        .to_str()
        .map_err(|_| format!("header {header_name} can't be converted to string"))?
        .parse::<T>()
        .map_err(|_| format!("header {header_name} has wrong type"))
        .map(Some)
}
