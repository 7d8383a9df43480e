/// Escapes text for use inside HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `2498` -> `2,498`
pub fn format_position(position: u64) -> String {
    let digits = position.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_welcome_email(
    name: &str,
    waitlist_position: u64,
    referral_code: &str,
    referral_link: &str,
) -> String {
    let name = escape_html(name);
    let code = escape_html(referral_code);
    let link = escape_html(referral_link);
    let position = format_position(waitlist_position);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Welcome to Kolplay</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;">
  <div style="background-color: #000000; min-height: 100vh; padding: 20px;">
    <div style="max-width: 600px; margin: 0 auto; background: linear-gradient(135deg, rgba(124, 58, 237, 0.1), rgba(20, 184, 166, 0.1)); border-radius: 24px; padding: 40px; border: 1px solid #1f2937;">

      <div style="text-align: center; margin-bottom: 40px;">
        <h1 style="color: #ffffff; font-size: 32px; font-weight: bold; margin: 0 0 16px 0;">Hi {name}! 👋</h1>
      </div>

      <div style="background: rgba(31, 41, 55, 0.5); border-radius: 16px; padding: 24px; margin-bottom: 32px; border: 1px solid #374151;">
        <p style="color: #d1d5db; font-size: 16px; line-height: 1.6; margin: 0;">
          Thank you for joining our early access waitlist! You're now part of an exclusive group getting first access to AI-powered KOL predictions.
        </p>
      </div>

      <div style="text-align: center; margin-bottom: 32px;">
        <div style="background: linear-gradient(135deg, #7c3aed, #14b8a6); border-radius: 16px; padding: 24px; display: inline-block; min-width: 200px;">
          <div style="color: #ffffff; font-size: 18px; font-weight: 600; margin-bottom: 8px; opacity: 0.9;">Your Position</div>
          <div style="color: #ffffff; font-size: 36px; font-weight: bold; margin: 0;">#{position}</div>
        </div>
      </div>

      <div style="background: rgba(31, 41, 55, 0.3); border-radius: 16px; padding: 24px; margin-bottom: 32px; border: 1px solid #374151;">
        <div style="margin-bottom: 12px;">
          <span style="color: #fbbf24; font-size: 20px; margin-right: 12px;">⚠️</span>
          <span style="color: #ffffff; font-size: 18px; font-weight: 600;">You're in the queue!</span>
        </div>
        <p style="color: #d1d5db; font-size: 14px; line-height: 1.5; margin: 0;">
          We'll review your application and let you know if you made it to our alpha program. Keep an eye on your inbox!
        </p>
      </div>

      <div style="background: rgba(31, 41, 55, 0.3); border-radius: 16px; padding: 24px; margin-bottom: 32px; border: 1px solid #374151;">
        <div style="margin-bottom: 16px;">
          <span style="color: #a855f7; font-size: 20px; margin-right: 12px;">🚀</span>
          <span style="color: #ffffff; font-size: 18px; font-weight: 600;">Boost Your Position</span>
        </div>
        <p style="color: #d1d5db; font-size: 14px; line-height: 1.5; margin-bottom: 20px;">
          Share your referral code and move up in the queue for each friend who joins!
        </p>

        <div style="background: #374151; border-radius: 12px; padding: 16px; text-align: center; margin-bottom: 12px;">
          <div style="color: #a855f7; font-family: 'Courier New', monospace; font-size: 24px; font-weight: bold; letter-spacing: 2px;">{code}</div>
        </div>

        <p style="color: #ffffff; font-size: 14px; font-weight: 600; margin-bottom: 8px;">Share this link:</p>
        <div style="background: #374151; border-radius: 12px; padding: 16px; word-break: break-all;">
          <a href="{link}" style="color: #14b8a6; text-decoration: none; font-size: 14px;">{link}</a>
        </div>

        <div style="text-align: center; margin-top: 24px;">
          <a href="{link}" style="display: inline-block; background: linear-gradient(135deg, #7c3aed, #14b8a6); color: #ffffff; text-decoration: none; padding: 12px 32px; border-radius: 12px; font-weight: 600; font-size: 16px;">Share Your Link</a>
        </div>
      </div>

      <div style="text-align: center; padding-top: 32px; border-top: 1px solid #374151;">
        <p style="color: #9ca3af; font-size: 14px; margin: 0;">
          Best regards,<br>
          <span style="color: #ffffff; font-weight: 600;">The Kolplay Team</span>
        </p>
        <div style="margin-top: 16px; font-weight: bold; font-size: 18px; color: #a855f7;">Play with the 1%</div>
      </div>

    </div>
  </div>
</body>
</html>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_get_thousands_separators() {
        assert_eq!(format_position(7), "7");
        assert_eq!(format_position(999), "999");
        assert_eq!(format_position(2498), "2,498");
        assert_eq!(format_position(1_234_567), "1,234,567");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn renders_all_parameters() {
        let html = render_welcome_email(
            "Ada",
            2498,
            "KT11VP",
            "https://www.kolplay.xyz?ref=KT11VP",
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Hi Ada! 👋"));
        assert!(html.contains("#2,498"));
        assert!(html.contains(">KT11VP</div>"));
        assert_eq!(
            html.matches(r#"href="https://www.kolplay.xyz?ref=KT11VP""#).count(),
            2
        );
    }

    #[test]
    fn user_supplied_name_cannot_inject_markup() {
        let html = render_welcome_email("<script>alert(1)</script>", 1, "KT11VP", "https://x");
        assert!(!html.contains("<script>"));
        assert!(html.contains("Hi &lt;script&gt;alert(1)&lt;/script&gt;!"));
    }
}
