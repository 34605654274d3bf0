/* tests/format_tests.rs */

#![cfg(all(feature = "json", feature = "yaml", feature = "toml"))]

use livecfg::format::{AnyFormat, FileType, FmtError, Format, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AppConfig {
	name: String,
	tags: Vec<String>,
	server: Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Server {
	port: i64,
	tls: bool,
}

fn sample() -> AppConfig {
	AppConfig {
		name: "MyApp".to_string(),
		tags: vec!["edge".to_string(), "eu".to_string()],
		server: Server {
			port: 8080,
			tls: true,
		},
	}
}

#[test]
fn test_every_format_round_trips() {
	for file_type in [FileType::Json, FileType::Yaml, FileType::Toml] {
		let format = AnyFormat::try_from(file_type).unwrap();
		let bytes = format.encode(&sample()).unwrap();
		let back: AppConfig = format.decode(&bytes).unwrap();
		assert_eq!(back, sample(), "round trip through {}", file_type);
	}
}

#[test]
fn test_encode_is_deterministic() {
	for file_type in [FileType::Json, FileType::Yaml, FileType::Toml] {
		let format = AnyFormat::try_from(file_type).unwrap();
		assert_eq!(
			format.encode(&sample()).unwrap(),
			format.encode(&sample()).unwrap()
		);
	}
}

#[test]
fn test_json_is_pretty_printed() {
	#[derive(Serialize)]
	#[serde(rename_all = "PascalCase")]
	struct Small {
		name: &'static str,
		server: SmallServer,
	}
	#[derive(Serialize)]
	#[serde(rename_all = "PascalCase")]
	struct SmallServer {
		port: i64,
	}

	let bytes = Json
		.encode(&Small {
			name: "MyApp",
			server: SmallServer { port: 8080 },
		})
		.unwrap();

	let expected = "{\n    \"Name\": \"MyApp\",\n    \"Server\": {\n        \"Port\": 8080\n    }\n}";
	assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn test_decode_rejects_malformed_input() {
	let cases: [(FileType, &[u8]); 3] = [
		(FileType::Json, b"{invalid json"),
		(FileType::Yaml, b"Name: [unclosed"),
		(FileType::Toml, b"Name = "),
	];

	for (file_type, input) in cases {
		let format = AnyFormat::try_from(file_type).unwrap();
		match format.decode::<AppConfig>(input) {
			Err(FmtError::Decode(_)) => (),
			other => panic!("expected decode error for {}, got {:?}", file_type, other),
		}
	}
}

#[test]
fn test_decode_rejects_wrong_shape() {
	let format = AnyFormat::try_from(FileType::Json).unwrap();
	let res = format.decode::<AppConfig>(b"{\"Name\": 42}");
	assert!(matches!(res, Err(FmtError::Decode(_))));
}

#[test]
fn test_file_type_parsing() {
	assert_eq!("json".parse::<FileType>().unwrap(), FileType::Json);
	assert_eq!("YAML".parse::<FileType>().unwrap(), FileType::Yaml);
	assert_eq!("yml".parse::<FileType>().unwrap(), FileType::Yaml);
	assert_eq!("toml".parse::<FileType>().unwrap(), FileType::Toml);
	assert!(matches!("ini".parse::<FileType>(), Err(FmtError::Unknown(_))));

	let parsed: FileType = serde_json::from_str("\"toml\"").unwrap();
	assert_eq!(parsed, FileType::Toml);
}

#[test]
fn test_extension_matches_file_type() {
	for file_type in [FileType::Json, FileType::Yaml, FileType::Toml] {
		let format = AnyFormat::try_from(file_type).unwrap();
		assert_eq!(format.extension(), file_type.extension());
	}
}
