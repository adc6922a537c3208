//! HTML email bodies. Placeholders are filled with simple string replacement.

pub const WELCOME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div style="max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; font-family: Arial, sans-serif;">
    <h2 style="color: #3b82f6; text-align: center;">Welcome to Hired.io!</h2>
    <div style="font-size: 16px; color: #333; line-height: 1.6;">
      <p>Hi <strong>{username}</strong>,</p>
      <p>We are thrilled to have you on board! Your account has been successfully created.</p>
      <p>Whether you are here to find your dream job or hire top talent, we are here to support you every step of the way.</p>
      <p style="text-align: center; margin-top: 20px;">
        <a href="{base_url}" style="display: inline-block; background-color: #3b82f6; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">Go to Dashboard</a>
      </p>
    </div>
    <div style="text-align: center; margin-top: 30px; font-size: 12px; color: #888;">
      <p>&copy; 2024 Hired.io. All rights reserved.</p>
    </div>
  </div>
</body>
</html>
"#;

pub const JOB_ALERT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div style="max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; font-family: Arial, sans-serif;">
    <h2 style="color: #3b82f6; text-align: center;">New Job Alert!</h2>
    <div style="font-size: 16px; color: #333; line-height: 1.6;">
      <p>Hi there,</p>
      <p>A new job matching your interest <strong>"{keyword}"</strong> has just been posted:</p>
      <div style="background: #f0f9ff; padding: 15px; border-radius: 6px; margin: 20px 0; border: 1px solid #bae6fd;">
        <h3 style="margin: 0; color: #0284c7;">{title}</h3>
        <p style="margin: 5px 0 0; color: #555;">{company} &bull; {location}</p>
      </div>
      <p style="text-align: center; margin-top: 20px;">
        <a href="{base_url}/jobs.html" style="display: inline-block; background-color: #3b82f6; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">View Job</a>
      </p>
    </div>
  </div>
</body>
</html>
"#;

pub fn welcome_body(base_url: &str, username: &str) -> String {
    WELCOME_TEMPLATE
        .replace("{base_url}", base_url)
        .replace("{username}", username)
}

pub fn job_alert_body(
    base_url: &str,
    keyword: &str,
    title: &str,
    company: &str,
    location: &str,
) -> String {
    JOB_ALERT_TEMPLATE
        .replace("{base_url}", base_url)
        .replace("{keyword}", keyword)
        .replace("{title}", title)
        .replace("{company}", company)
        .replace("{location}", location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_body_fills_placeholders() {
        let body = welcome_body("http://localhost:8000", "alice");
        assert!(body.contains("<strong>alice</strong>"));
        assert!(body.contains("http://localhost:8000"));
        assert!(!body.contains("{username}"));
        assert!(!body.contains("{base_url}"));
    }

    #[test]
    fn test_job_alert_body_fills_placeholders() {
        let body = job_alert_body(
            "http://localhost:8000",
            "rust",
            "Senior Rust Engineer",
            "Acme",
            "Berlin",
        );
        assert!(body.contains("\"rust\""));
        assert!(body.contains("Senior Rust Engineer"));
        assert!(body.contains("Acme &bull; Berlin"));
        assert!(!body.contains('{'));
    }
}
