/// Validate a Turkish national id (TC kimlik no): exactly 11 digits,
/// not starting with 0.
pub fn validate_tc_no(tc_no: &str) -> Option<String> {
    let trimmed = tc_no.trim();
    if trimmed.is_empty() {
        return Some("TC kimlik numarası zorunludur".to_string());
    }
    if trimmed.len() != 11 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some("TC kimlik numarası 11 haneli olmalıdır".to_string());
    }
    if trimmed.starts_with('0') {
        return Some("TC kimlik numarası 0 ile başlayamaz".to_string());
    }
    None
}

/// Validate a login password: present, nothing more. The backend decides the rest.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Şifre zorunludur".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} zorunludur"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} en fazla {max_len} karakter olabilir"));
    }
    None
}

/// Profile form rules: a name of at least two characters, and when a new
/// password is requested, the current one plus a matching confirmation of
/// at least six characters.
pub fn validate_profile(isim: &str, current: &str, new_password: &str, confirm: &str) -> Vec<String> {
    let mut errors = vec![];
    let name = isim.trim();
    if name.is_empty() {
        errors.push("İsim boş olamaz".to_string());
    } else if name.chars().count() < 2 {
        errors.push("İsim en az 2 karakter olmalıdır".to_string());
    }
    if !new_password.is_empty() {
        if current.is_empty() {
            errors.push("Mevcut şifre zorunludur".to_string());
        }
        if new_password.chars().count() < 6 {
            errors.push("Yeni şifre en az 6 karakter olmalıdır".to_string());
        }
        if new_password != confirm {
            errors.push("Şifreler eşleşmiyor".to_string());
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tc_no_rules() {
        assert_eq!(validate_tc_no("12345678901"), None);
        assert!(validate_tc_no("").is_some());
        assert!(validate_tc_no("1234567890").is_some());
        assert!(validate_tc_no("1234567890a").is_some());
        assert!(validate_tc_no("02345678901").is_some());
    }

    #[test]
    fn required_counts_characters_not_bytes() {
        assert_eq!(validate_required("şşş", "Yanıt", 3), None);
        assert!(validate_required("   ", "Yanıt", 3).is_some());
        assert!(validate_required("abcd", "Yanıt", 3).is_some());
    }

    #[test]
    fn profile_rules() {
        assert!(validate_profile("Ayşe", "", "", "").is_empty());
        assert_eq!(validate_profile(" A ", "", "", ""), vec!["İsim en az 2 karakter olmalıdır"]);
        assert_eq!(
            validate_profile("Ayşe", "", "12345", "1234"),
            vec!["Mevcut şifre zorunludur", "Yeni şifre en az 6 karakter olmalıdır", "Şifreler eşleşmiyor"]
        );
        assert!(validate_profile("Ayşe", "eski", "yenisifre", "yenisifre").is_empty());
    }
}
