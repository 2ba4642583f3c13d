use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::Path,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::get,
    Extension, Router,
};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::{
    error::{ErrorMessage, HttpError},
    events::topics,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    AppState,
};

pub fn events_handler() -> Router {
    Router::new().route("/:topic", get(stream_events))
}

/// A client may watch the broad request feed, or its own user-scoped topics.
/// Admins may watch anything.
fn topic_allowed(topic: &str, auth: &JWTAuthMiddeware) -> bool {
    if auth.user.role == UserRole::Admin {
        return true;
    }
    topic == topics::SERVICE_REQUESTS
        || topic == topics::requests_for_user(auth.user.id)
        || topic == topics::notifications_for_user(auth.user.id)
}

pub async fn stream_events(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    if !topic_allowed(&topic, &auth) {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let rx = app_state.events.subscribe(&topic).await;

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(value) => {
            let event_type = value
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("message");

            Some(Ok::<_, Infallible>(
                Event::default().event(event_type).data(value.to_string()),
            ))
        }
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => {
            Some(Ok(Event::default().event("lagged").data("{}")))
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::User;
    use chrono::Utc;
    use uuid::Uuid;

    fn auth_for(role: UserRole) -> JWTAuthMiddeware {
        JWTAuthMiddeware {
            user: User {
                id: Uuid::new_v4(),
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                phone: None,
                password: "hash".to_string(),
                role,
                blocked: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_anyone_can_watch_broad_request_feed() {
        let auth = auth_for(UserRole::User);
        assert!(topic_allowed(topics::SERVICE_REQUESTS, &auth));
    }

    #[test]
    fn test_user_scoped_topics_require_matching_id() {
        let auth = auth_for(UserRole::User);
        assert!(topic_allowed(
            &topics::notifications_for_user(auth.user.id),
            &auth
        ));
        assert!(!topic_allowed(
            &topics::notifications_for_user(Uuid::new_v4()),
            &auth
        ));
    }

    #[test]
    fn test_admin_may_watch_any_topic() {
        let auth = auth_for(UserRole::Admin);
        assert!(topic_allowed(
            &topics::requests_for_user(Uuid::new_v4()),
            &auth
        ));
    }
}
