pub fn detect_system_dark_mode() -> bool {
    // Windows: registry holds the per-user app theme preference
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        {
            // AppsUseLightTheme: 0 = dark mode, 1 = light mode
            if let Ok(value) = hkcu.get_value::<u32, _>("AppsUseLightTheme") {
                return value == 0;
            }
        }
    }

    // Linux: ask gsettings; covers GNOME and most GTK-based desktops
    #[cfg(target_os = "linux")]
    {
        if gsettings_contains("gtk-theme", "dark") || gsettings_contains("color-scheme", "prefer-dark") {
            return true;
        }
    }

    // macOS: AppleInterfaceStyle is only set when dark mode is active
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            if output.status.success() {
                let style = String::from_utf8_lossy(&output.stdout).to_lowercase();
                if style.contains("dark") {
                    return true;
                }
            }
        }
    }

    // Default to light mode if detection fails
    false
}

#[cfg(target_os = "linux")]
fn gsettings_contains(key: &str, needle: &str) -> bool {
    use std::process::Command;

    Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", key])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).to_lowercase().contains(needle))
        .unwrap_or(false)
}
