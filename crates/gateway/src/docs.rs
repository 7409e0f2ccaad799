use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::rest::health::health_check,
        crate::rest::members::register,
        crate::rest::members::login,
        crate::rest::members::list_members,
        crate::rest::members::list_all_members,
        crate::rest::members::lookup_member,
        crate::rest::members::search_members,
        crate::rest::members::current_member,
        crate::rest::members::update_current_member,
        crate::rest::members::delete_current_member
    ),
    components(
        schemas(
            crate::rest::health::HealthResponse,
            crate::rest::members::MemberProfile,
            crate::rest::members::MemberPage,
            roster_members::RegisterRequest,
            roster_members::LoginRequest,
            crate::rest::members::LoginResponse,
            roster_members::UpdateMemberRequest,
            crate::rest::members::CurrentMemberResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Members", description = "Registration, login and directory lookups")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("JWT".to_string());
        }

        components
            .security_schemes
            .insert("bearerAuth".to_string(), scheme);
    }
}
