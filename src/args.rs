use crate::profile::{BackendProfile, PromptDelivery};
use crate::request::TaskRequest;

/// Output of the argument builder: the literal argv for the child, plus the
/// prompt text when the profile delivers it over stdin instead.
#[derive(Debug, PartialEq, Eq)]
pub struct BuiltArgs {
    pub argv: Vec<String>,
    pub stdin_payload: Option<String>,
}

/// Build the child's argument vector. Pure and total over a valid profile
/// and request. Arguments are passed as a vector, never joined into a shell
/// string, so prompt content cannot inject commands.
pub fn build_args(profile: &BackendProfile, req: &TaskRequest) -> BuiltArgs {
    let mut argv: Vec<String> = Vec::new();
    let mut stdin_payload = None;

    match profile.delivery {
        PromptDelivery::Stdin => stdin_payload = Some(req.prompt.clone()),
        PromptDelivery::Argument { flag } => {
            if let Some(flag) = flag {
                argv.push(flag.to_string());
            }
            argv.push(req.prompt.clone());
        }
    }

    argv.extend(profile.base_args.iter().map(|s| s.to_string()));
    argv.push(profile.model_flag.to_string());
    argv.push(req.model.clone());

    if req.json_output {
        argv.extend(profile.json_flags.iter().map(|s| s.to_string()));
    }

    for name in &req.backend_options {
        if let Some((_, flags)) = profile.extra_flags.iter().find(|(n, _)| n == name) {
            argv.extend(flags.iter().map(|s| s.to_string()));
        }
    }

    BuiltArgs {
        argv,
        stdin_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile;
    use crate::request::DEFAULT_TIMEOUT_SECS;

    fn request(prompt: &str, model: &str) -> TaskRequest {
        TaskRequest {
            prompt: prompt.to_string(),
            model: model.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            json_output: false,
            workdir: None,
            backend_options: vec![],
        }
    }

    #[test]
    fn claude_prompt_goes_to_stdin() {
        let built = build_args(&profile::claude(), &request("explain this", "opus"));
        assert_eq!(built.argv, vec!["-p", "--model", "opus"]);
        assert_eq!(built.stdin_payload.as_deref(), Some("explain this"));
    }

    #[test]
    fn gemini_prompt_is_a_flagged_argument() {
        let built = build_args(
            &profile::gemini(),
            &request("explain this", "gemini-2.5-pro"),
        );
        assert_eq!(built.argv, vec!["-p", "explain this", "-m", "gemini-2.5-pro"]);
        assert_eq!(built.stdin_payload, None);
    }

    #[test]
    fn json_flags_are_appended_on_request() {
        let mut req = request("x", "sonnet");
        req.json_output = true;
        let built = build_args(&profile::claude(), &req);
        assert_eq!(
            built.argv,
            vec!["-p", "--model", "sonnet", "--output-format", "json"]
        );
    }

    #[test]
    fn enabled_bundles_append_their_flags() {
        let mut req = request("x", "gemini-2.5-flash");
        req.json_output = true;
        req.backend_options = vec!["yolo".to_string()];
        let built = build_args(&profile::gemini(), &req);
        assert_eq!(
            built.argv,
            vec![
                "-p",
                "x",
                "-m",
                "gemini-2.5-flash",
                "--output-format",
                "json",
                "--yolo"
            ]
        );
    }

    #[test]
    fn prompt_with_shell_metacharacters_stays_one_argument() {
        let built = build_args(&profile::gemini(), &request("a; rm -rf $HOME && b", "m"));
        assert_eq!(built.argv[1], "a; rm -rf $HOME && b");
    }
}
