//! End-to-end publish flow: claim metadata in, collision-free name out.

use claimkit::publish::MemoryPublisher;
use claimkit::{claim_name_from_title, publish_with_retry, PublishOptions, PublishedNames};
use claimkit_testkit::generators::{stream_claim, StreamParams};

fn options_from_params(params: &StreamParams) -> PublishOptions {
    PublishOptions {
        description: params.description.clone(),
        author: params.author.clone(),
        license: params.license.clone(),
        content_type: params.content_type.clone(),
        nsfw: params.nsfw,
    }
}

#[tokio::test]
async fn test_publish_generated_claim_metadata() {
    let params = StreamParams::default();
    let record = stream_claim(&params);
    let metadata = &record.stream.as_ref().unwrap().metadata;

    let publisher = MemoryPublisher::new();
    let names = PublishedNames::new();

    let outcome = publish_with_retry(
        &publisher,
        &names,
        &metadata.title,
        "life.gif",
        1.0,
        &options_from_params(&params),
    )
    .await
    .unwrap();

    assert_eq!(outcome.name, claim_name_from_title(&metadata.title, 1));
    assert_eq!(outcome.attempts, 1);
}

#[tokio::test]
async fn test_republishing_same_title_picks_next_name() {
    let params = StreamParams::default();
    let publisher = MemoryPublisher::new();
    let names = PublishedNames::new();
    let options = options_from_params(&params);

    let first = publish_with_retry(&publisher, &names, &params.title, "a.gif", 1.0, &options)
        .await
        .unwrap();
    let second = publish_with_retry(&publisher, &names, &params.title, "b.gif", 1.0, &options)
        .await
        .unwrap();

    assert_eq!(first.name, "game-of-life");
    assert_eq!(second.name, "game-of-life-2");
    assert_eq!(publisher.published(), vec!["game-of-life", "game-of-life-2"]);
}
