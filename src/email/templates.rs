pub fn render_invitation(company_name: &str, invite_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>You've been invited to {company_name}</h2>
    <p>You've been invited to join <strong>{company_name}</strong> on Workhub.</p>
    <p><a href="{invite_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Accept Invitation</a></p>
    <p style="color: #666; font-size: 14px;">This invitation expires in 7 days. If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_member_added(name: &str, company_name: &str, base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>You've been added to {company_name}</h2>
    <p>Hi {name},</p>
    <p>You've been added as a member of <strong>{company_name}</strong> on Workhub.</p>
    <p><a href="{base_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Log In</a></p>
</body>
</html>"#
    )
}
