use std::io::Cursor;

use serde_json::{json, Value};
use swimlog::service::{self, Response};

fn exchange(input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    service::serve(Cursor::new(input), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn one_response_per_request() {
    let input = concat!(
        r#"{"workout": "4x100 free", "poolType": "scm", "intensitySystem": "polar"}"#,
        "\n",
        "\n",
        r#"{"workout": "4x(100 fly + 100 free)", "poolType": "scy", "intensitySystem": "international"}"#,
        "\n",
    );

    let responses = exchange(input);
    assert_eq!(responses.len(), 2);

    assert_eq!(responses[0]["ok"], json!(true));
    assert_eq!(responses[0]["summary"]["totalDistance"], json!(400));
    assert_eq!(
        responses[0]["summary"]["strokeDistances"]["freestyle"],
        json!(400)
    );

    assert_eq!(responses[1]["summary"]["totalDistance"], json!(800));
    assert_eq!(
        responses[1]["summary"]["strokeDistances"]["butterfly"],
        json!(400)
    );
}

#[test]
fn failures_do_not_stop_the_stream() {
    let input = concat!(
        "not json\n",
        r#"{"workout": "100 free", "intensitySystem": "metric"}"#,
        "\n",
        r#"{"workout": 42, "intensitySystem": "polar"}"#,
        "\n",
        r#"{"workout": "200 back easy", "intensitySystem": "polar"}"#,
        "\n",
    );

    let responses = exchange(input);
    assert_eq!(responses.len(), 4);

    for response in &responses[..3] {
        assert_eq!(response["ok"], json!(false));
        assert!(response["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid input"));
        assert!(response
            .get("summary")
            .is_none());
    }

    assert_eq!(responses[3]["ok"], json!(true));
    assert_eq!(
        responses[3]["summary"]["intensityDistances"]["easy"],
        json!(200)
    );
}

#[test]
fn summary_has_every_stroke() {
    let responses = exchange("{\"workout\": \"\", \"intensitySystem\": \"polar\"}\n");

    let strokes = responses[0]["summary"]["strokeDistances"]
        .as_object()
        .unwrap();
    for name in [
        "freestyle",
        "backstroke",
        "breaststroke",
        "butterfly",
        "im",
        "choice",
    ] {
        assert_eq!(strokes.get(name), Some(&json!(0)), "{}", name);
    }
    assert_eq!(
        responses[0]["summary"]["intensityDistances"],
        json!({})
    );
}

#[test]
fn responses_read_back() {
    let response = service::respond(r#"{"workout": "3x\n(50 fly)", "intensitySystem": "polar"}"#);
    let text = serde_json::to_string(&response).unwrap();

    let again: Response = serde_json::from_str(&text).unwrap();
    assert_eq!(again, response);
    assert_eq!(
        again
            .summary
            .unwrap()
            .total_distance,
        150
    );
}
