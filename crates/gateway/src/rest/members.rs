//! Member REST endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use roster_members::{Claims, LoginRequest, Member, Page, RegisterRequest, UpdateMemberRequest};
use roster_runtime::RosterServices;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::require_member;
use crate::response::{ResponseData, MSG_NO_RESULTS, MSG_QUERY_OK};

/// Public view of a member. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub identifier: i64,
    pub display_name: String,
    pub email: String,
    pub sex: String,
    pub grade: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Member> for MemberProfile {
    fn from(member: Member) -> Self {
        Self {
            identifier: member.identifier,
            display_name: member.display_name,
            email: member.email,
            sex: member.sex,
            grade: member.grade,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    pub items: Vec<MemberProfile>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub page_count: u64,
}

impl From<Page<Member>> for MemberPage {
    fn from(page: Page<Member>) -> Self {
        let page_count = page.page_count();
        let page = page.map(MemberProfile::from);
        Self {
            items: page.items,
            total_count: page.total_count,
            page_index: page.page_index,
            page_size: page.page_size,
            page_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMemberResponse {
    pub identifier: i64,
    pub display_name: String,
    pub expires_at: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number
    pub page_index: Option<u32>,
    /// Items per page
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    pub identifier: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Exact display name
    pub name: Option<String>,
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
}

/// Create member routes
pub fn create_member_routes(services: RosterServices) -> Router<RosterServices> {
    let authenticated = Router::new()
        .route(
            "/api/members/me",
            get(current_member).patch(update_current_member).delete(delete_current_member),
        )
        .route_layer(axum_middleware::from_fn_with_state(services, require_member));

    Router::new()
        .route("/api/members/register", post(register))
        .route("/api/members/login", post(login))
        .route("/api/members", get(list_members))
        .route("/api/members/all", get(list_all_members))
        .route("/api/members/lookup", get(lookup_member))
        .route("/api/members/search", get(search_members))
        .merge(authenticated)
}

fn invalid_body(rejection: JsonRejection) -> GatewayError {
    GatewayError::InvalidRequest(rejection.body_text())
}

fn invalid_query(rejection: QueryRejection) -> GatewayError {
    GatewayError::InvalidRequest(rejection.body_text())
}

fn required<T>(value: Option<T>, name: &str) -> GatewayResult<T> {
    value.ok_or_else(|| GatewayError::InvalidRequest(format!("missing query parameter {name}")))
}

fn page_message(page: &MemberPage) -> &'static str {
    if page.total_count == 0 {
        MSG_NO_RESULTS
    } else {
        MSG_QUERY_OK
    }
}

fn claimed_identifier(claims: &Claims) -> GatewayResult<i64> {
    claims
        .identifier()
        .ok_or_else(|| GatewayError::Unauthorized("Token subject is not a member".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/members/register",
    tag = "Members",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration outcome; code 40001 when rejected")
    )
)]
pub async fn register(
    State(services): State<RosterServices>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> GatewayResult<ResponseData<()>> {
    let Json(body) = body.map_err(invalid_body)?;

    services.registration.register(body).await?;
    Ok(ResponseData::ok(None, "registration succeeded"))
}

#[utoipa::path(
    post,
    path = "/api/members/login",
    tag = "Members",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token; code 40001 on bad credentials", body = LoginResponse)
    )
)]
pub async fn login(
    State(services): State<RosterServices>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> GatewayResult<ResponseData<LoginResponse>> {
    let Json(body) = body.map_err(invalid_body)?;

    let issued = services
        .authentication
        .login(body.identifier, &body.password)
        .await?;

    Ok(ResponseData::ok(
        Some(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at.to_rfc3339(),
        }),
        "login succeeded",
    ))
}

#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of members in registration order", body = MemberPage)
    )
)]
pub async fn list_members(
    State(services): State<RosterServices>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> GatewayResult<ResponseData<MemberPage>> {
    let Query(query) = query.map_err(invalid_query)?;
    let page_index = required(query.page_index, "pageIndex")?;
    let page_size = required(query.page_size, "pageSize")?;

    let page = MemberPage::from(services.directory.list_all(page_index, page_size).await?);
    let message = page_message(&page);
    Ok(ResponseData::ok(Some(page), message))
}

#[utoipa::path(
    get,
    path = "/api/members/all",
    tag = "Members",
    responses(
        (status = 200, description = "Every member, unpaged", body = Vec<MemberProfile>)
    )
)]
pub async fn list_all_members(
    State(services): State<RosterServices>,
) -> GatewayResult<ResponseData<Vec<MemberProfile>>> {
    let members = services.directory.list_everything().await?;

    let profiles: Vec<MemberProfile> = members.into_iter().map(MemberProfile::from).collect();
    Ok(ResponseData::ok(Some(profiles), MSG_QUERY_OK))
}

#[utoipa::path(
    get,
    path = "/api/members/lookup",
    tag = "Members",
    params(LookupQuery),
    responses(
        (status = 200, description = "The member, or null data when absent", body = MemberProfile)
    )
)]
pub async fn lookup_member(
    State(services): State<RosterServices>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> GatewayResult<ResponseData<MemberProfile>> {
    let Query(query) = query.map_err(invalid_query)?;
    let identifier = required(query.identifier, "identifier")?;

    let response = match services.directory.find_by_identifier(identifier).await? {
        Some(member) => ResponseData::ok(Some(MemberProfile::from(member)), MSG_QUERY_OK),
        None => ResponseData::ok(None, MSG_NO_RESULTS),
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/members/search",
    tag = "Members",
    params(SearchQuery),
    responses(
        (status = 200, description = "Members with exactly this display name", body = MemberPage)
    )
)]
pub async fn search_members(
    State(services): State<RosterServices>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> GatewayResult<ResponseData<MemberPage>> {
    let Query(query) = query.map_err(invalid_query)?;
    let name = required(query.name, "name")?;
    let page_index = required(query.page_index, "pageIndex")?;
    let page_size = required(query.page_size, "pageSize")?;

    let page = MemberPage::from(
        services
            .directory
            .find_by_name(&name, page_index, page_size)
            .await?,
    );
    let message = page_message(&page);
    Ok(ResponseData::ok(Some(page), message))
}

#[utoipa::path(
    get,
    path = "/api/members/me",
    tag = "Members",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Identity carried by the bearer token", body = CurrentMemberResponse),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn current_member(
    Extension(claims): Extension<Claims>,
) -> GatewayResult<ResponseData<CurrentMemberResponse>> {
    let identifier = claimed_identifier(&claims)?;

    Ok(ResponseData::ok(
        Some(CurrentMemberResponse {
            identifier,
            display_name: claims.name,
            expires_at: claims.exp,
        }),
        MSG_QUERY_OK,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/members/me",
    tag = "Members",
    security(("bearerAuth" = [])),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "The updated member", body = MemberProfile),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn update_current_member(
    State(services): State<RosterServices>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> GatewayResult<ResponseData<MemberProfile>> {
    let identifier = claimed_identifier(&claims)?;
    let Json(body) = body.map_err(invalid_body)?;

    let member = services
        .membership
        .update_member(identifier, body)
        .await?;
    Ok(ResponseData::ok(Some(member.into()), "update succeeded"))
}

#[utoipa::path(
    delete,
    path = "/api/members/me",
    tag = "Members",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Membership removed"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn delete_current_member(
    State(services): State<RosterServices>,
    Extension(claims): Extension<Claims>,
) -> GatewayResult<ResponseData<()>> {
    let identifier = claimed_identifier(&claims)?;

    services.membership.delete_member(identifier).await?;
    Ok(ResponseData::ok(None, "membership removed"))
}
