//! Extractors whose rejections are reported through [`AppError`].
//!
//! axum's own `Json`, `Path` and `Form` answer malformed input with a
//! plain-text response. These wrappers run the same extraction and turn the
//! rejection into a 422 with the usual `{error, code}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `application/x-www-form-urlencoded` request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);
