// Declarative command table: every single-shot device operation is one
// entry of {name, template, arity} instead of a hand-written method body.
// Templates use positional `{0}`, `{1}`, ... slots that are substituted
// in argument order. Values are interpolated as-is, not shell-escaped;
// they go straight into argv so there is no shell to escape for.

use super::error::{AdbError, AdbResult};

/// One logical device operation and the adb argv it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub template: &'static [&'static str],
    /// Number of positional slots in `template`.
    pub arity: usize,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "get_system_settings", template: &["shell", "settings", "list", "system"], arity: 0 },
    CommandSpec { name: "get_global_settings", template: &["shell", "settings", "list", "global"], arity: 0 },
    CommandSpec { name: "get_secure_settings", template: &["shell", "settings", "list", "secure"], arity: 0 },
    CommandSpec { name: "put_setting", template: &["shell", "settings", "put", "{0}", "{1}", "{2}"], arity: 3 },
    CommandSpec { name: "enable_wifi", template: &["shell", "svc", "wifi", "enable"], arity: 0 },
    CommandSpec { name: "disable_wifi", template: &["shell", "svc", "wifi", "disable"], arity: 0 },
    CommandSpec { name: "enable_mobile_data", template: &["shell", "svc", "data", "enable"], arity: 0 },
    CommandSpec { name: "disable_mobile_data", template: &["shell", "svc", "data", "disable"], arity: 0 },
    CommandSpec { name: "set_password", template: &["shell", "locksettings", "set-password", "{0}"], arity: 1 },
    CommandSpec { name: "clear_password", template: &["shell", "locksettings", "clear", "--old", "{0}"], arity: 1 },
    CommandSpec { name: "disable_lock_screen", template: &["shell", "locksettings", "set-disabled", "true"], arity: 0 },
    CommandSpec { name: "get_system_packages", template: &["shell", "pm", "list", "packages", "-f"], arity: 0 },
    CommandSpec { name: "get_third_party_packages", template: &["shell", "pm", "list", "packages", "-3"], arity: 0 },
    CommandSpec { name: "install", template: &["install", "{0}"], arity: 1 },
    CommandSpec { name: "uninstall", template: &["uninstall", "--user", "0", "{0}"], arity: 1 },
    CommandSpec { name: "grant_permission", template: &["shell", "pm", "grant", "{0}", "{1}"], arity: 2 },
    CommandSpec { name: "revoke_permission", template: &["shell", "pm", "revoke", "{0}", "{1}"], arity: 2 },
    CommandSpec { name: "set_home_app", template: &["shell", "cmd", "package", "set-home-activity", "{0}"], arity: 1 },
    CommandSpec { name: "expand_notifications", template: &["shell", "cmd", "statusbar", "expand-notifications"], arity: 0 },
    CommandSpec { name: "tap", template: &["shell", "input", "tap", "{0}", "{1}"], arity: 2 },
    CommandSpec { name: "getprop", template: &["shell", "getprop", "{0}"], arity: 1 },
    CommandSpec { name: "push", template: &["push", "{0}", "{1}"], arity: 2 },
    CommandSpec { name: "pull", template: &["pull", "{0}", "{1}"], arity: 2 },
    CommandSpec { name: "restore", template: &["restore", "{0}"], arity: 1 },
    // Requires a rooted device.
    CommandSpec { name: "factory_reset", template: &["shell", "am", "broadcast", "-a", "android.intent.action.MASTER_CLEAR"], arity: 0 },
];

/// Look up a command by its logical name.
pub fn spec(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

impl CommandSpec {
    /// Expand the template with `args` bound to the positional slots.
    pub fn render(&self, args: &[&str]) -> AdbResult<Vec<String>> {
        if args.len() != self.arity {
            return Err(AdbError::InvalidArgument {
                reason: format!(
                    "'{}' takes {} argument(s), got {}",
                    self.name,
                    self.arity,
                    args.len()
                ),
            });
        }
        let mut argv = Vec::with_capacity(self.template.len());
        for token in self.template {
            let mut token = (*token).to_string();
            for (i, arg) in args.iter().enumerate() {
                token = token.replace(&format!("{{{i}}}"), arg);
            }
            argv.push(token);
        }
        Ok(argv)
    }
}
