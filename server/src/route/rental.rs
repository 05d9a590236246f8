use application::service::{CreateRentalService, FinishRentalService, GetRentalService};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::request::{
    invalid_rental_id, CreateRentalRequest, FinishRentalRequest, GetRentalRequest,
    RentalTransformer,
};
use self::response::RentalPresenter;

mod request;
mod response;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), RentalPresenter)
                    .bypass(|| module.get_rentals())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>,
                 req: Result<Json<CreateRentalRequest>, JsonRejection>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.create_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/finish",
            post(
                |State(module): State<AppModule>,
                 req: Result<Json<FinishRentalRequest>, JsonRejection>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.finish_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            // shadows `/rentals/:id` for GET
            .get(|| async { Err::<(), _>(invalid_rental_id("finish")) }),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(GetRentalRequest::new(id))?
                        .handle(|dto| module.get_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use rand::Rng;
    use serde_json::{json, Value};
    use sqlx::PgPool;
    use time::macros::date;
    use time::{Date, Duration, OffsetDateTime};
    use tower::ServiceExt;

    use super::RentalRouter;
    use crate::handler::AppModule;

    struct Fixture {
        router: Router,
        pool: PgPool,
    }

    async fn fixture() -> Fixture {
        let module = AppModule::new().await.unwrap();
        let router = Router::new().route_rental().with_state(module);
        let url = dotenvy::var("POSTGRES_URL").unwrap();
        let pool = PgPool::connect(&url).await.unwrap();
        Fixture { router, pool }
    }

    impl Fixture {
        async fn user(&self, birth_date: Date) -> i32 {
            let suffix: u32 = rand::thread_rng().gen();
            sqlx::query_scalar(
                // language=postgresql
                r#"
                INSERT INTO users (first_name, last_name, email, cpf, birth_date)
                VALUES ('Bruno', 'Costa', $1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(format!("bruno{suffix}@example.com"))
            .bind(format!("{suffix:011}"))
            .bind(birth_date)
            .fetch_one(&self.pool)
            .await
            .unwrap()
        }

        async fn adult(&self) -> i32 {
            self.user(date!(1990 - 06 - 15)).await
        }

        async fn minor(&self) -> i32 {
            let today = OffsetDateTime::now_utc().date();
            self.user(today - Duration::days(365 * 10)).await
        }

        async fn movie(&self, adults_only: bool) -> i32 {
            sqlx::query_scalar(
                // language=postgresql
                r#"
                INSERT INTO movies (name, adults_only)
                VALUES ('Central do Brasil', $1)
                RETURNING id
                "#,
            )
            .bind(adults_only)
            .fetch_one(&self.pool)
            .await
            .unwrap()
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let request = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn rent(&self, user_id: i32, movies: &[i32]) -> (StatusCode, Value) {
            self.send(
                Method::POST,
                "/rentals",
                Some(json!({ "userId": user_id, "moviesId": movies })),
            )
            .await
        }
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn lists_rentals() {
        let fixture = fixture().await;
        let user = fixture.adult().await;
        let movie = fixture.movie(false).await;
        let (status, created) = fixture.rent(user, &[movie]).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = fixture.send(Method::GET, "/rentals", None).await;
        assert_eq!(status, StatusCode::OK);
        let rentals = body.as_array().unwrap();
        assert!(rentals.iter().any(|rental| rental["id"] == created["id"]));
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn get_rental_validates_id() {
        let fixture = fixture().await;
        let (status, body) = fixture.send(Method::GET, "/rentals/invalid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        for uri in ["/rentals/finish", "/rentals/+5", "/rentals/0"] {
            let (status, _) = fixture.send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }

        let (status, body) = fixture.send(Method::GET, "/rentals/999999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Rental not found.");
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn creates_and_shows_rental() {
        let fixture = fixture().await;
        let user = fixture.adult().await;
        let first = fixture.movie(false).await;
        let second = fixture.movie(true).await;

        let (status, created) = fixture.rent(user, &[first, second]).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["userId"], user);
        assert_eq!(created["closed"], false);
        let date = OffsetDateTime::parse(
            created["date"].as_str().unwrap(),
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        let end_date = OffsetDateTime::parse(
            created["endDate"].as_str().unwrap(),
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        assert_eq!(end_date - date, Duration::days(3));

        let uri = format!("/rentals/{}", created["id"]);
        let (status, detail) = fixture.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["id"], created["id"]);
        let movies = detail["movies"].as_array().unwrap();
        assert_eq!(movies.len(), 2);
        assert!(movies.iter().all(|movie| movie["rentalId"] == created["id"]));
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_rejects_bad_bodies() {
        let fixture = fixture().await;
        let (status, _) = fixture
            .send(Method::POST, "/rentals", Some(json!({ "userId": 1 })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let user = fixture.adult().await;
        let (status, body) = fixture.rent(user, &[]).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Please select at least 1 movie to rent.");
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_reports_missing_user_and_movie() {
        let fixture = fixture().await;
        let movie = fixture.movie(false).await;
        let (status, body) = fixture.rent(999999999, &[movie]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        let user = fixture.adult().await;
        let (status, body) = fixture.rent(user, &[999999999]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Movie not found");
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_enforces_business_rules() {
        let fixture = fixture().await;
        let adult = fixture.adult().await;
        let movie = fixture.movie(false).await;
        let (status, _) = fixture.rent(adult, &[movie]).await;
        assert_eq!(status, StatusCode::CREATED);

        let other = fixture.movie(false).await;
        let (status, body) = fixture.rent(adult, &[other]).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["message"], "The user already have a rental!");

        let someone = fixture.adult().await;
        let (status, body) = fixture.rent(someone, &[movie]).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Movie already in a rental.");

        let minor = fixture.minor().await;
        let adult_movie = fixture.movie(true).await;
        let (status, body) = fixture.rent(minor, &[adult_movie]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["message"],
            "Cannot rent adult movies if you are under 18 years old."
        );
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn rejected_create_leaves_nothing_behind() {
        let fixture = fixture().await;
        let user = fixture.adult().await;
        let movie = fixture.movie(false).await;

        let (status, body) = fixture.rent(user, &[movie, movie]).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Movie already in a rental.");

        let (status, created) = fixture.rent(user, &[movie]).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["userId"], user);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn finish_releases_movies() {
        let fixture = fixture().await;
        let user = fixture.adult().await;
        let movie = fixture.movie(false).await;
        let (_, created) = fixture.rent(user, &[movie]).await;

        let (status, body) = fixture
            .send(
                Method::POST,
                "/rentals/finish",
                Some(json!({ "rentalId": created["id"] })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rentalId"], created["id"]);
        assert_eq!(body["overdueDays"], 0);
        assert_eq!(body["lateFee"], 0);

        let uri = format!("/rentals/{}", created["id"]);
        let (_, detail) = fixture.send(Method::GET, &uri, None).await;
        assert_eq!(detail["closed"], true);
        assert_eq!(detail["movies"], json!([]));

        let someone = fixture.adult().await;
        let (status, _) = fixture.rent(someone, &[movie]).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn finish_rejects_unknown_and_malformed() {
        let fixture = fixture().await;
        let (status, body) = fixture
            .send(
                Method::POST,
                "/rentals/finish",
                Some(json!({ "rentalId": 999999999 })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Rental not found.");

        let (status, _) = fixture
            .send(Method::POST, "/rentals/finish", Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
