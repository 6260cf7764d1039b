use std::fmt;
use std::path::Path;

use crate::host::HostContext;
use crate::runner::{CommandSpec, Mode};
use crate::steps::Step;

/// Which install-command template a package uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSource {
    /// Official repositories, installed through `sudo pacman`.
    Pacman,
    /// AUR packages, installed through the yay helper.
    Yay,
}

/// One installable unit and the manager that installs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub source: PackageSource,
}

impl Package {
    const fn new(name: &'static str, source: PackageSource) -> Self {
        Self { name, source }
    }

    /// Privileged install command for this package. Both templates run
    /// attached to the terminal so the user can authenticate.
    pub fn install_spec(&self) -> CommandSpec {
        match self.source {
            PackageSource::Pacman => {
                CommandSpec::argv("sudo", ["pacman", "-S", self.name, "--noconfirm"])
            }
            PackageSource::Yay => CommandSpec::argv("yay", ["-S", self.name, "--noconfirm"]),
        }
    }
}

const BASIC_PACKAGES: &[Package] = &[
    Package::new("vesktop", PackageSource::Yay),
    Package::new("spotify", PackageSource::Yay),
    Package::new("code", PackageSource::Pacman), // VSCode
];

const DEV_PACKAGES: &[Package] = &[
    Package::new("python", PackageSource::Pacman),
    Package::new("git", PackageSource::Pacman),
    Package::new("docker", PackageSource::Pacman),
    Package::new("flatpak", PackageSource::Pacman),
    Package::new("postman-bin", PackageSource::Yay),
];

/// pnpm bootstrap plus the project/global packages, in the exact order they
/// must run. The first line pipes through sh, the rest are plain pnpm calls
/// kept as shell strings so the sequence reads as one block.
const NODE_COMMANDS: &[&str] = &[
    "curl -fsSL https://get.pnpm.io/install.sh | sh -",
    "pnpm install express --save",
    "pnpm i cors",
    "pnpm i dotenv",
    "pnpm i pm2 --save -g",
    "pnpm i nodemon --save -D",
    "pnpm i ts-node --save -D",
    "pnpm i typescript --save -D",
    "pnpm i dotenvx --save -D -g",
    "pnpm install dotenv --save -g",
];

const FREETUBE_URL: &str =
    "https://github.com/FreeTubeApp/FreeTube/releases/download/v0.21.3/freetube-0.21.3-amd64.AppImage";

/// One selectable group in the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    BasicApps,
    NodeJs,
    DevApps,
}

impl MenuItem {
    /// Checklist entries, in menu order.
    pub const ALL: [MenuItem; 3] = [MenuItem::BasicApps, MenuItem::NodeJs, MenuItem::DevApps];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::BasicApps => "Basic apps (discord, spotify, vscode...)",
            MenuItem::NodeJs => "NodeJS",
            MenuItem::DevApps => "Dev apps (python, git..)",
        }
    }

    /// Ordered steps executed when this item is confirmed.
    pub fn steps(&self, host: &HostContext) -> Vec<Step> {
        match self {
            MenuItem::BasicApps => {
                let mut steps: Vec<Step> = BASIC_PACKAGES
                    .iter()
                    .copied()
                    .map(Step::InstallPackage)
                    .collect();
                steps.extend(freetube_steps(host));
                steps
            }
            MenuItem::NodeJs => NODE_COMMANDS
                .iter()
                .map(|cmd| Step::run(CommandSpec::shell(*cmd), Mode::Captured))
                .collect(),
            MenuItem::DevApps => DEV_PACKAGES
                .iter()
                .copied()
                .map(Step::InstallPackage)
                .collect(),
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// FreeTube ships as an AppImage, so installing it means fetching the image,
/// registering a launcher entry and wiring up a shell alias in both rc files.
fn freetube_steps(host: &HostContext) -> Vec<Step> {
    let appimage = host.home.join("Apps/freetube.AppImage");
    let appimage_path = appimage.display().to_string();
    let applications = host.home.join(".local/share/applications");
    let desktop_file = applications.join("freetube.desktop");
    let alias_line = format!("alias freetube='{}'", appimage_path);

    vec![
        Step::run(
            CommandSpec::argv(
                "curl",
                ["-L", "--create-dirs", "-o", appimage_path.as_str(), FREETUBE_URL],
            ),
            Mode::Captured,
        ),
        Step::run(
            CommandSpec::argv("chmod", ["+x", appimage_path.as_str()]),
            Mode::Captured,
        ),
        Step::WriteFile {
            path: desktop_file,
            contents: freetube_desktop_entry(&appimage),
        },
        Step::run(
            CommandSpec::argv(
                "update-desktop-database",
                [applications.display().to_string()],
            ),
            Mode::Captured,
        ),
        Step::AppendLine {
            path: host.home.join(".bashrc"),
            line: alias_line.clone(),
        },
        Step::AppendLine {
            path: host.home.join(".config/fish/config.fish"),
            line: alias_line,
        },
    ]
}

fn freetube_desktop_entry(appimage: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=FreeTube\n\
         Comment=An open source desktop YouTube player\n\
         Exec={}\n\
         Terminal=false\n\
         Categories=AudioVideo;Network;\n",
        appimage.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn host() -> HostContext {
        HostContext {
            home: PathBuf::from("/home/tester"),
            user: "tester".to_string(),
        }
    }

    #[test]
    fn labels_are_fixed() {
        assert_eq!(
            MenuItem::BasicApps.label(),
            "Basic apps (discord, spotify, vscode...)"
        );
        assert_eq!(MenuItem::NodeJs.label(), "NodeJS");
        assert_eq!(MenuItem::DevApps.label(), "Dev apps (python, git..)");
    }

    #[test]
    fn pacman_template_is_privileged() {
        let spec = Package::new("git", PackageSource::Pacman).install_spec();
        assert_eq!(spec.display(), "sudo pacman -S git --noconfirm");
    }

    #[test]
    fn yay_template_is_unprivileged_helper() {
        let spec = Package::new("vesktop", PackageSource::Yay).install_spec();
        assert_eq!(spec.display(), "yay -S vesktop --noconfirm");
    }

    #[test]
    fn nodejs_has_bootstrap_then_nine_pnpm_commands() {
        let steps = MenuItem::NodeJs.steps(&host());
        assert_eq!(steps.len(), 10);
        assert_eq!(
            steps[0].describe(),
            "curl -fsSL https://get.pnpm.io/install.sh | sh -"
        );
        assert_eq!(steps[9].describe(), "pnpm install dotenv --save -g");
    }

    #[test]
    fn dev_apps_are_purely_table_driven() {
        let steps = MenuItem::DevApps.steps(&host());
        assert_eq!(steps.len(), DEV_PACKAGES.len());
        for (step, pkg) in steps.iter().zip(DEV_PACKAGES) {
            assert_eq!(step, &Step::InstallPackage(*pkg));
        }
    }

    #[test]
    fn freetube_desktop_entry_embeds_home_path() {
        let steps = MenuItem::BasicApps.steps(&host());
        let write = steps
            .iter()
            .find_map(|s| match s {
                Step::WriteFile { path, contents } => Some((path, contents)),
                _ => None,
            })
            .expect("basic apps writes a desktop file");

        assert_eq!(
            write.0,
            &PathBuf::from("/home/tester/.local/share/applications/freetube.desktop")
        );
        assert!(write.1.contains("Exec=/home/tester/Apps/freetube.AppImage"));
    }

    #[test]
    fn freetube_alias_targets_both_rc_files() {
        let steps = MenuItem::BasicApps.steps(&host());
        let targets: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                Step::AppendLine { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(
            targets,
            vec![
                PathBuf::from("/home/tester/.bashrc"),
                PathBuf::from("/home/tester/.config/fish/config.fish"),
            ]
        );
    }
}
