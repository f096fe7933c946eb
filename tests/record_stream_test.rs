//! Record services feeding live streams

mod utils;

use futures::StreamExt;
use movies_lib::modules::broadcast::{frames, BroadcastHub};
use movies_lib::modules::movie_info::MovieInfo;
use movies_lib::modules::review::Review;
use movies_lib::shared::errors::{ApiError, AppError, ErrorKind};
use utils::factories::{MovieInfoFactory, ReviewFactory};
use utils::helpers::build_services;

#[tokio::test]
async fn test_created_movie_infos_stream_as_ndjson() {
    let services = build_services(BroadcastHub::replay_all("movie-info"), BroadcastHub::replay_all("review"));

    let first = services
        .movie_info_service
        .add_movie_info(MovieInfoFactory::new().build())
        .await
        .unwrap();
    let second = services
        .movie_info_service
        .add_movie_info(MovieInfoFactory::new().with_name("The Dark Knight").with_year(Some(2008)).build())
        .await
        .unwrap();

    let frames = frames::ndjson(services.movie_info_service.subscribe().unwrap());
    services.movie_info_hub.close();
    let lines: Vec<String> = frames.map(|frame| frame.unwrap()).collect().await;

    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.ends_with('\n') && line.matches('\n').count() == 1));
    let decoded: MovieInfo = serde_json::from_str(lines[1].trim_end()).unwrap();
    assert_eq!(decoded, second);
    assert!(lines[0].contains(first.id().unwrap()));
}

#[tokio::test]
async fn test_invalid_review_is_rejected_and_never_streamed() {
    let services = build_services(BroadcastHub::replay_all("movie-info"), BroadcastHub::multicast("review", 16));
    let mut sub = services.review_service.subscribe().unwrap();

    let err = services
        .review_service
        .add_review(ReviewFactory::new().for_movie(None).with_rating(Some(-9.0)).build())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::ValidationError(
            "rating.negative : please pass a non-negative value,review.movieInfoId must not be null"
                .to_string()
        )
    );

    let api_error = ApiError::from(err);
    assert_eq!(api_error.kind, ErrorKind::ClientInputInvalid);
    assert_eq!(api_error.response_status(), 400);

    let created = services
        .review_service
        .add_review(ReviewFactory::new().build())
        .await
        .unwrap();
    assert_eq!(sub.recv().await, Some(created));
    assert_eq!(sub.try_recv(), None);
}

#[tokio::test]
async fn test_review_lookup_by_movie() {
    let services = build_services(BroadcastHub::replay_all("movie-info"), BroadcastHub::replay_all("review"));
    for comment in ["Awesome Movie", "Awesome Movie1"] {
        services
            .review_service
            .add_review(ReviewFactory::new().for_movie(Some("1")).with_comment(comment).build())
            .await
            .unwrap();
    }
    services
        .review_service
        .add_review(ReviewFactory::new().for_movie(Some("2")).build())
        .await
        .unwrap();

    let reviews: Vec<Review> = services.review_service.get_reviews_for_movie("1").await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(services.review_service.get_reviews().await.unwrap().len(), 3);
    assert!(matches!(
        services.review_service.get_reviews_for_movie("3").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_single_consumer_stream_buffers_until_attached() {
    let services = build_services(BroadcastHub::single_consumer("movie-info"), BroadcastHub::replay_all("review"));
    let created = services
        .movie_info_service
        .add_movie_info(MovieInfoFactory::new().with_cast(&["Christian Bale"]).build())
        .await
        .unwrap();

    let mut consumer = services.movie_info_service.subscribe().unwrap();
    assert!(matches!(
        services.movie_info_service.subscribe(),
        Err(AppError::BroadcastError(_))
    ));
    assert_eq!(consumer.recv().await, Some(created));
}

#[tokio::test]
async fn test_publish_after_close_keeps_record() {
    let services = build_services(BroadcastHub::replay_all("movie-info"), BroadcastHub::replay_all("review"));
    services.movie_info_hub.close();

    let created = services
        .movie_info_service
        .add_movie_info(MovieInfoFactory::new().build())
        .await
        .unwrap();
    let stored = services
        .movie_info_service
        .get_movie_info_by_id(created.id().unwrap())
        .await
        .unwrap();
    assert_eq!(stored, created);
}
