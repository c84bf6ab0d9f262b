use std::collections::VecDeque;

use git_ssh_switch::{Error, GitConfigWriter, GitScope, Prompt, Result};

/// Records every `git config` call and checks them against the expected
/// ones when dropped.
pub struct MockGit<'a> {
    expected: &'a [(&'a str, &'a str)],
    fail_on: Option<&'a str>,
    output: Vec<(GitScope, String, String)>,
}

impl GitConfigWriter for MockGit<'_> {
    fn set(&mut self, scope: &GitScope, key: &str, value: &str) -> Result<()> {
        self.output
            .push((scope.clone(), key.to_string(), value.to_string()));
        if self.fail_on == Some(key) {
            return Err(Error::GitConfigApplyFailed {
                key: key.to_string(),
                reason: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Drop for MockGit<'_> {
    fn drop(&mut self) {
        let written: Vec<(&str, &str)> = self
            .output
            .iter()
            .map(|(_, key, value)| (key.as_str(), value.as_str()))
            .collect();
        assert_eq!(self.expected, written.as_slice())
    }
}

impl<'a> MockGit<'a> {
    pub fn new(expected: &'a [(&'a str, &'a str)]) -> MockGit<'a> {
        MockGit {
            expected,
            fail_on: None,
            output: Vec::new(),
        }
    }

    pub fn failing_on(mut self, key: &'a str) -> MockGit<'a> {
        self.fail_on = Some(key);
        self
    }

    pub fn scopes(&self) -> Vec<GitScope> {
        self.output.iter().map(|(scope, _, _)| scope.clone()).collect()
    }
}

/// Answers prompts from a fixed script.
#[derive(Default)]
pub struct ScriptedPrompt {
    selections: VecDeque<Option<usize>>,
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn selecting(selection: Option<usize>) -> Self {
        ScriptedPrompt {
            selections: VecDeque::from([selection]),
            ..Default::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn select_index(&mut self, prompt: &str, candidates: &[String]) -> Result<Option<usize>> {
        self.questions.push(prompt.to_string());
        self.questions.extend(candidates.iter().cloned());
        Ok(self
            .selections
            .pop_front()
            .expect("unexpected selection prompt"))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.questions.push(prompt.to_string());
        Ok(false)
    }
}
