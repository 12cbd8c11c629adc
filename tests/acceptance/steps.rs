use crate::CliWorld;
use and_cli::config::Settings;
use and_cli::prompt::Confirm;
use and_cli::storage::{FileTokenStorage, TokenStorage};
use cucumber::{given, then, when};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_repository(full_name: &str) -> (String, String) {
    let (owner, name) = full_name
        .split_once('/')
        .expect("repository should be written as owner/name");
    (owner.to_string(), name.to_string())
}

fn repository_json(owner: &str, name: &str) -> Value {
    json!({
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": {"login": owner},
        "url": format!("https://api.github.com/repos/{owner}/{name}")
    })
}

async fn requests_with(world: &CliWorld, http_method: &str) -> Vec<Request> {
    world
        .server()
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == http_method)
        .collect()
}

#[given("a mock GitHub API")]
async fn given_mock_github_api(world: &mut CliWorld) {
    world.server = Some(wiremock::MockServer::start().await);
    world.home = Some(tempfile::tempdir().expect("Failed to create temp dir"));
}

#[given(regex = r#"^the GitHub token "([^"]*)" is configured$"#)]
async fn given_token_configured(world: &mut CliWorld, token: String) {
    FileTokenStorage::new(world.config_path())
        .configure_token(&token)
        .expect("Failed to write token");
}

#[given(regex = r#"^the config file content is '(.*)'$"#)]
async fn given_config_file_content(world: &mut CliWorld, content: String) {
    let path = world.config_path();
    std::fs::create_dir_all(path.parent().expect("config path has a parent"))
        .expect("Failed to create config dir");
    std::fs::write(&path, content.replace("\\n", "\n")).expect("Failed to write config file");
}

#[given(regex = r#"^the organization "([^"]*)" has repositories "([^"]*)"$"#)]
async fn given_organization_repositories(world: &mut CliWorld, org: String, names: String) {
    let repositories: Vec<Value> = split_list(&names)
        .iter()
        .map(|name| repository_json(&org, name))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{org}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(repositories))
        .mount(world.server())
        .await;
}

#[given(regex = r#"^the repository "([^"]*)" has topics "([^"]*)"$"#)]
async fn given_repository_topics(world: &mut CliWorld, full_name: String, topics: String) {
    let (owner, name) = split_repository(&full_name);
    let topics_path = format!("/repos/{owner}/{name}/topics");
    Mock::given(method("GET"))
        .and(path(topics_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": split_list(&topics) })))
        .mount(world.server())
        .await;
    Mock::given(method("PUT"))
        .and(path(topics_path))
        .respond_with(|request: &Request| {
            ResponseTemplate::new(200).set_body_bytes(request.body.clone())
        })
        .mount(world.server())
        .await;
}

#[given(regex = r#"^updating topics of "([^"]*)" fails with status (\d+)$"#)]
async fn given_topic_update_fails(world: &mut CliWorld, full_name: String, status: u16) {
    let (owner, name) = split_repository(&full_name);
    let topics_path = format!("/repos/{owner}/{name}/topics");
    Mock::given(method("GET"))
        .and(path(topics_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": [] })))
        .mount(world.server())
        .await;
    Mock::given(method("PUT"))
        .and(path(topics_path))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(json!({ "message": "Validation Failed" })),
        )
        .mount(world.server())
        .await;
}

#[given(regex = r#"^the repository "([^"]*)" has issues "([^"]*)"$"#)]
async fn given_repository_issues(world: &mut CliWorld, full_name: String, numbers: String) {
    let (owner, name) = split_repository(&full_name);
    let issues: Vec<Value> = split_list(&numbers)
        .iter()
        .map(|number| {
            let number: u64 = number.parse().expect("issue numbers should be integers");
            json!({
                "number": number,
                "title": format!("Issue {number}"),
                "body": format!("Body of issue {number}"),
                "user": {"login": "octocat"}
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{owner}/{name}/issues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues))
        .mount(world.server())
        .await;
}

#[given(regex = r#"^issues can be created in "([^"]*)"$"#)]
async fn given_issue_creation(world: &mut CliWorld, full_name: String) {
    let (owner, name) = split_repository(&full_name);
    Mock::given(method("POST"))
        .and(path(format!("/repos/{owner}/{name}/issues")))
        .respond_with(|request: &Request| {
            let mut issue: Value =
                serde_json::from_slice(&request.body).unwrap_or_else(|_| json!({}));
            issue["number"] = json!(100);
            issue["user"] = json!({"login": "and-cli"});
            ResponseTemplate::new(201).set_body_json(issue)
        })
        .mount(world.server())
        .await;
}

#[given(regex = r#"^the confirmation is answered "(yes|no)"$"#)]
async fn given_confirmation_answer(world: &mut CliWorld, answer: String) {
    world.confirm_answer = Some(answer == "yes");
}

#[when(regex = r#"^I run `and-cli ([^`]*)`$"#)]
async fn when_run_and_cli(world: &mut CliWorld, command: String) {
    let args: Vec<String> = std::iter::once("and-cli".to_string())
        .chain(command.split_whitespace().map(str::to_string))
        .collect();
    let settings = Settings::default()
        .with_api_base_url(&world.server().uri())
        .with_config_path(world.config_path());
    let confirm = Answer(world.confirm_answer.unwrap_or(false));

    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let result = and_cli::run::run_with_confirm(args, settings, &confirm, writer_option).await;

    world.captured_output = buffer;
    world.command_result = Some(result);
}

#[then("the command should succeed")]
async fn then_command_should_succeed(world: &mut CliWorld) {
    match &world.command_result {
        Some(Ok(())) => {}
        other => panic!("expected success, got {other:?}"),
    }
}

#[then(regex = r#"^the command should fail with "(.*)"$"#)]
async fn then_command_should_fail_with(world: &mut CliWorld, expected: String) {
    match &world.command_result {
        Some(Err(err)) => {
            let message = format!("{err:#}");
            assert!(
                message.contains(&expected),
                "expected error containing {expected:?}, got {message:?}"
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[then(regex = r#"^the exit code should be (\d+)$"#)]
async fn then_exit_code_should_be(world: &mut CliWorld, expected: i32) {
    let code = match &world.command_result {
        Some(Ok(())) => 0,
        Some(Err(err)) => err
            .downcast_ref::<and_cli::Error>()
            .map_or(2, and_cli::Error::exit_code),
        None => panic!("no command was run"),
    };
    assert_eq!(code, expected);
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_should_contain(world: &mut CliWorld, expected: String) {
    let output = String::from_utf8_lossy(&world.captured_output);
    assert!(
        output.contains(&expected),
        "expected output containing {expected:?}, got {output:?}"
    );
}

#[then("the output should be empty")]
async fn then_output_should_be_empty(world: &mut CliWorld) {
    assert!(
        world.captured_output.is_empty(),
        "expected no output, got {:?}",
        String::from_utf8_lossy(&world.captured_output)
    );
}

#[then(regex = r#"^(\d+) topic updates? should have been sent$"#)]
async fn then_topic_updates_sent(world: &mut CliWorld, expected: usize) {
    assert_eq!(requests_with(world, "PUT").await.len(), expected);
}

#[then(regex = r#"^(\d+) issues? should have been created$"#)]
async fn then_issues_created(world: &mut CliWorld, expected: usize) {
    assert_eq!(requests_with(world, "POST").await.len(), expected);
}

#[then("no request should have been sent")]
async fn then_no_request_sent(world: &mut CliWorld) {
    let requests = world.server().received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "unexpected requests: {requests:?}");
}

#[then(regex = r#"^the created issue should have the title "(.*)"$"#)]
async fn then_created_issue_title(world: &mut CliWorld, expected: String) {
    let posts = requests_with(world, "POST").await;
    let request = posts.last().expect("an issue should have been created");
    let body: Value = serde_json::from_slice(&request.body).expect("issue body should be JSON");
    assert_eq!(body["title"], json!(expected));
}

#[then(regex = r#"^every request should be authorized with "(.*)"$"#)]
async fn then_requests_authorized(world: &mut CliWorld, token: String) {
    let requests = world.server().received_requests().await.unwrap_or_default();
    assert!(!requests.is_empty(), "no request was sent");
    let expected = format!("Bearer {token}");
    for request in requests {
        let authorization = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok());
        assert_eq!(authorization, Some(expected.as_str()), "{}", request.url);
    }
}

#[then(regex = r#"^the config file should be '(.*)'$"#)]
async fn then_config_file_should_be(world: &mut CliWorld, expected: String) {
    let content = std::fs::read_to_string(world.config_path()).expect("Failed to read config file");
    assert_eq!(content, expected.replace("\\n", "\n"));
}

#[then(regex = r#"^the stored GitHub token should be "(.*)"$"#)]
async fn then_stored_token(world: &mut CliWorld, expected: String) {
    let token = FileTokenStorage::new(world.config_path())
        .get_token()
        .expect("Failed to read token");
    assert_eq!(token.as_deref(), Some(expected.as_str()));
}

#[then(regex = r#"^the output should not contain "(.*)"$"#)]
async fn then_output_should_not_contain(world: &mut CliWorld, unexpected: String) {
    let output = String::from_utf8_lossy(&world.captured_output);
    assert!(
        !output.contains(&unexpected),
        "expected output without {unexpected:?}, got {output:?}"
    );
}
