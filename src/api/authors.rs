//! Author catalog endpoints

use axum::{
    extract::{Path, State},
    Form, Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{AuthorForm, DeleteAuthorForm},
        view::{AuthorView, Outcome},
    },
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors ordered by family name", body = AuthorView)
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<Json<AuthorView>> {
    let view = state.services.authors.list().await?;
    Ok(Json(view))
}

/// Author details with the books they wrote
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorView),
        (status = 404, description = "Malformed ID or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorView>> {
    let view = state.services.authors.detail(&id).await?;
    Ok(Json(view))
}

/// Empty create form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Create form", body = AuthorView)
    )
)]
pub async fn author_create_get(State(state): State<AppState>) -> Json<AuthorView> {
    Json(state.services.authors.create_form())
}

/// Submit the create form
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author created, redirect to its detail page"),
        (status = 200, description = "Form rejected, re-rendered with errors", body = AuthorView)
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Outcome<AuthorView>> {
    state.services.authors.create_submit(&form).await
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author and the books blocking deletion", body = AuthorView),
        (status = 303, description = "Author does not exist, redirect to the list")
    )
)]
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome<AuthorView>> {
    state.services.authors.delete_form(&id).await
}

/// Delete an author that no book references
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    request_body(content = DeleteAuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author removed (or already absent), redirect to the list"),
        (status = 200, description = "Books still reference the author", body = AuthorView)
    )
)]
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Outcome<AuthorView>> {
    state.services.authors.delete_submit(&id, &form).await
}

#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 501, description = "Not implemented", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome<AuthorView>> {
    state.services.authors.update_form(&id).await
}

#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 501, description = "Not implemented", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome<AuthorView>> {
    state.services.authors.update_submit(&id).await
}
