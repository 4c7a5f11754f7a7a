use image::{DynamicImage, ImageFormat};
use image_survey::config::{Config, HttpConfig};
use image_survey::crawler::{build_http_client, survey, FailureKind, Surveyor};
use image_survey::output::{ReportWriter, RunStats};
use image_survey::source::PageTarget;
use image_survey::SurveyError;
use std::io::Cursor;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// PNG with the given dimensions, zero-padded to exactly `size` bytes
fn png_of_size(width: u32, height: u32, size: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode PNG");
    assert!(buf.len() <= size, "encoded PNG larger than requested size");
    buf.resize(size, 0);
    buf
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Runs a survey into in-memory reports
async fn run_survey(lines: &[&str], config: &Config) -> (RunStats, String, String) {
    let targets: Vec<PageTarget> = lines.iter().map(|line| PageTarget::new(*line)).collect();
    let client = build_http_client(&config.http).expect("Failed to build client");
    let surveyor = Surveyor::with_client(client);

    let mut writer = ReportWriter::new(Vec::new(), Vec::new(), config.report.min_image_bytes)
        .expect("Failed to create report writer");
    let stats = surveyor
        .run(&targets, &mut writer)
        .await
        .expect("Survey failed");

    let (images, failures) = writer.into_inner().expect("Failed to unwrap writers");
    (
        stats,
        String::from_utf8(images).unwrap(),
        String::from_utf8(failures).unwrap(),
    )
}

#[tokio::test]
async fn test_end_to_end_schemeless_entry() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let image_url = format!("{}/big.png", base_url);

    mount_get(
        &mock_server,
        "/",
        html_page(&format!(r#"<img src="{}">"#, image_url)),
    )
    .await;
    mount_get(
        &mock_server,
        "/big.png",
        ResponseTemplate::new(200)
            .set_body_bytes(png_of_size(800, 600, 150_000))
            .insert_header("content-type", "image/png"),
    )
    .await;

    // e.g. "127.0.0.1:12345", fetched as http://127.0.0.1:12345
    let entry = base_url.trim_start_matches("http://").to_string();
    let (stats, images, failures) = run_survey(&[&entry], &Config::default()).await;

    assert_eq!(
        images,
        format!(
            "website,image,bytes,width,height\n{},{},150000,800,600\n",
            entry, image_url
        )
    );
    assert_eq!(failures, "url,error\n");
    assert_eq!(stats.pages_processed, 1);
    assert_eq!(stats.qualifying_images, 1);
}

#[tokio::test]
async fn test_failed_pages_recorded_once_each() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(&mock_server, "/missing", ResponseTemplate::new(404)).await;
    mount_get(&mock_server, "/broken", ResponseTemplate::new(500)).await;

    let missing = format!("{}/missing", base_url);
    let broken = format!("{}/broken", base_url);
    let (stats, images, failures) =
        run_survey(&[&missing, "http://exa mple.com", &broken], &Config::default()).await;

    assert_eq!(images, "website,image,bytes,width,height\n");

    let lines: Vec<&str> = failures.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "url,error");
    assert!(lines[1].starts_with(&format!("{},", missing)));
    assert!(lines[1].contains(&format!("Error fetching {}: ", missing)));
    assert!(lines[2].starts_with("http://exa mple.com,"));
    assert!(lines[3].starts_with(&format!("{},", broken)));

    assert_eq!(stats.pages_failed, 3);
    assert_eq!(stats.failures_by_kind[&FailureKind::Status], 2);
    assert_eq!(stats.failures_by_kind[&FailureKind::InvalidUrl], 1);
}

#[tokio::test]
async fn test_connection_refused_is_page_failure() {
    // Bind then drop a server so its port refuses connections
    let closed_uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let (stats, images, failures) = run_survey(&[&closed_uri], &Config::default()).await;

    assert_eq!(images.lines().count(), 1);
    assert_eq!(failures.lines().count(), 2);
    assert!(failures
        .lines()
        .nth(1)
        .unwrap()
        .starts_with(&format!("{},Error fetching {}", closed_uri, closed_uri)));
    assert_eq!(stats.pages_failed, 1);
}

#[tokio::test]
async fn test_timeout_is_page_failure() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/slow",
        html_page("late").set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = Config {
        http: HttpConfig {
            timeout_secs: 1,
            ..HttpConfig::default()
        },
        ..Config::default()
    };
    let slow = format!("{}/slow", mock_server.uri());
    let (stats, _, failures) = run_survey(&[&slow], &config).await;

    assert_eq!(failures.lines().count(), 2);
    assert_eq!(stats.failures_by_kind[&FailureKind::Timeout], 1);
}

#[tokio::test]
async fn test_threshold_and_image_failures() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/",
        html_page(
            r#"<img src="/small.png">
               <img src="/exact.png">
               <img src="/gone.png">
               <embed src="/vector.svg">
               <object data="/large.png"></object>"#,
        ),
    )
    .await;
    mount_get(
        &mock_server,
        "/small.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(400, 300, 102_399)),
    )
    .await;
    mount_get(
        &mock_server,
        "/exact.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(10, 20, 102_400)),
    )
    .await;
    mount_get(&mock_server, "/gone.png", ResponseTemplate::new(404)).await;

    let mut svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">"#.to_vec();
    svg.resize(200_000, b' ');
    mount_get(
        &mock_server,
        "/vector.svg",
        ResponseTemplate::new(200).set_body_bytes(svg),
    )
    .await;
    mount_get(
        &mock_server,
        "/large.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(640, 480, 300_000)),
    )
    .await;

    let page = format!("{}/", base_url);
    let (stats, images, failures) = run_survey(&[&page], &Config::default()).await;

    let lines: Vec<&str> = images.lines().collect();
    assert_eq!(
        lines,
        vec![
            "website,image,bytes,width,height".to_string(),
            format!("{},{}/exact.png,102400,10,20", page, base_url),
            format!("{},{}/vector.svg,200000,,", page, base_url),
            format!("{},{}/large.png,300000,640,480", page, base_url),
        ]
    );

    // A broken image is dropped, not reported as a failed website
    assert_eq!(failures, "url,error\n");
    assert_eq!(stats.references_found, 5);
    assert_eq!(stats.images_probed, 4);
    assert_eq!(stats.probe_failures, 1);
    assert_eq!(stats.images_without_dimensions, 1);
    assert_eq!(stats.qualifying_images, 3);
}

#[tokio::test]
async fn test_redirect_final_url_is_resolution_base() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/dir/page.html"),
    )
    .await;
    mount_get(
        &mock_server,
        "/dir/page.html",
        html_page(r#"<img src="../img/a.png">"#),
    )
    .await;
    mount_get(
        &mock_server,
        "/img/a.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(32, 32, 120_000)),
    )
    .await;

    let old = format!("{}/old", base_url);
    let (_, images, _) = run_survey(&[&old], &Config::default()).await;

    // The website column keeps the entry as given
    assert_eq!(
        images.lines().nth(1),
        Some(format!("{},{}/img/a.png,120000,32,32", old, base_url).as_str())
    );
}

#[tokio::test]
async fn test_duplicates_fetched_once_and_data_uris_never() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/",
        html_page(&format!(
            r#"<img src="/same.png">
               <img src="data:image/png;base64,iVBORw0KGgo=">
               <embed src="{}/same.png">
               <img src="same.png">"#,
            base_url
        )),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/same.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_of_size(5, 5, 110_000)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = format!("{}/", base_url);
    let (stats, images, _) = run_survey(&[&page], &Config::default()).await;

    assert_eq!(images.lines().count(), 2);
    assert_eq!(stats.references_found, 1);

    // Wiremock verifies the single fetch when mock_server drops
}

#[tokio::test]
async fn test_pages_processed_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(&mock_server, "/a", html_page(r#"<img src="/a.png">"#)).await;
    mount_get(&mock_server, "/b", html_page(r#"<img src="/b.png">"#)).await;
    mount_get(
        &mock_server,
        "/a.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(1, 1, 200_000)),
    )
    .await;
    mount_get(
        &mock_server,
        "/b.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(2, 2, 200_000)),
    )
    .await;
    mount_get(&mock_server, "/c", ResponseTemplate::new(403)).await;

    let a = format!("{}/a", base_url);
    let b = format!("{}/b", base_url);
    let c = format!("{}/c", base_url);
    let (_, images, failures) = run_survey(&[&b, &c, &a], &Config::default()).await;

    let websites: Vec<&str> = images
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(websites, vec![b.as_str(), a.as_str()]);

    // Failed pages contribute no image rows
    assert!(!images.contains(&format!("{},", c)));
    assert!(failures.lines().nth(1).unwrap().starts_with(&format!("{},", c)));
}

#[tokio::test]
async fn test_empty_list_writes_header_only_files() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("urls.txt");
    std::fs::write(&list, "\n   \n\n").unwrap();

    let stats = survey(&Config::default(), &list, Some(dir.path()))
        .await
        .expect("Survey failed");

    assert_eq!(stats.pages_processed, 0);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("image_report.csv")).unwrap(),
        "website,image,bytes,width,height\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("failed_websites.csv")).unwrap(),
        "url,error\n"
    );
}

#[tokio::test]
async fn test_missing_list_aborts_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("does-not-exist.txt");

    let result = survey(&Config::default(), &list, Some(dir.path())).await;

    assert!(matches!(result, Err(SurveyError::InputFile { .. })));
    assert!(!dir.path().join("image_report.csv").exists());
    assert!(!dir.path().join("failed_websites.csv").exists());
}

#[tokio::test]
async fn test_survey_writes_report_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(&mock_server, "/", html_page(r#"<img src="/big.png">"#)).await;
    mount_get(
        &mock_server,
        "/big.png",
        ResponseTemplate::new(200).set_body_bytes(png_of_size(800, 600, 150_000)),
    )
    .await;
    mount_get(&mock_server, "/down", ResponseTemplate::new(503)).await;

    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("urls.txt");
    std::fs::write(&list, format!("{}/\n\n{}/down\n", base_url, base_url)).unwrap();

    let out = dir.path().join("out");
    let stats = survey(&Config::default(), &list, Some(out.as_path()))
        .await
        .expect("Survey failed");
    assert_eq!(stats.pages_processed, 2);

    let images = std::fs::read_to_string(dir.path().join("out/image_report.csv")).unwrap();
    assert_eq!(
        images.lines().nth(1),
        Some(format!("{}/,{}/big.png,150000,800,600", base_url, base_url).as_str())
    );

    let failures = std::fs::read_to_string(dir.path().join("out/failed_websites.csv")).unwrap();
    assert_eq!(failures.lines().count(), 2);
    assert!(failures
        .lines()
        .nth(1)
        .unwrap()
        .starts_with(&format!("{}/down,", base_url)));
}
