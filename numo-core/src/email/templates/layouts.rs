// Template data. Every template is wrapped in HTML_LAYOUT / TEXT_LAYOUT.

pub(super) const HTML_LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        body { font-family: Georgia, 'Times New Roman', serif; line-height: 1.6; color: #2d2440; margin: 0; padding: 0; background-color: #f4f0fa; }
        .container { max-width: 600px; margin: 40px auto; padding: 40px; background: #ffffff; border-radius: 12px; box-shadow: 0 2px 8px rgba(60,30,110,0.12); }
        .header { text-align: center; margin-bottom: 30px; }
        .header h1 { color: #5b2a9b; margin: 0; font-size: 26px; letter-spacing: 0.5px; }
        .content { margin-bottom: 30px; }
        .button { display: inline-block; background-color: #5b2a9b; color: #ffffff; padding: 14px 28px; text-decoration: none; border-radius: 6px; font-weight: 600; }
        .link { color: #5b2a9b; word-break: break-all; }
        .muted { color: #776c88; font-size: 13px; }
        .panel { background-color: #f8f5fc; border: 1px solid #e3d9f2; padding: 16px; border-radius: 8px; margin: 20px 0; }
        .notes { background-color: #fff8e6; border: 1px solid #f0c36d; padding: 12px; border-radius: 6px; margin: 20px 0; }
        table.items { width: 100%; border-collapse: collapse; margin: 20px 0; }
        table.items th { text-align: left; border-bottom: 2px solid #e3d9f2; padding: 8px 4px; font-size: 13px; color: #776c88; }
        table.items td { border-bottom: 1px solid #eee; padding: 8px 4px; vertical-align: top; }
        .num { text-align: right; white-space: nowrap; }
        .total { font-size: 18px; font-weight: bold; text-align: right; }
        .footer { text-align: center; font-size: 12px; color: #776c88; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; }
    </style>
</head>
<body>
    <div class="container">
{{body}}
        <div class="footer">
            <p><a href="{{app_url}}" class="link">{{app_name}}</a></p>
            <p>&copy; {{year}} {{app_name}}</p>
        </div>
    </div>
</body>
</html>"#;

pub(super) const TEXT_LAYOUT: &str = r#"{{body}}

--
{{app_name}} - {{app_url}}
(c) {{year}} {{app_name}}"#;

pub(super) const WELCOME_HTML: &str = r#"        <div class="header">
            <h1>Welcome, {{name}}</h1>
        </div>
        <div class="content">
            <p>Your {{app_name}} account is ready.</p>
            <p>Draw your first cards, explore your life path number and keep a journal of every reading.</p>
            <p style="text-align: center; margin: 30px 0;">
                <a href="{{app_url}}" class="button">Begin a Reading</a>
            </p>
            <p class="muted">If you did not create this account, you can safely ignore this email.</p>
        </div>"#;

pub(super) const WELCOME_TEXT: &str = r#"Welcome, {{name}}

Your {{app_name}} account is ready.

Draw your first cards, explore your life path number and keep a journal of every reading:

{{app_url}}

If you did not create this account, you can safely ignore this email."#;

pub(super) const PASSWORD_RESET_HTML: &str = r#"        <div class="header">
            <h1>Reset Your Password</h1>
        </div>
        <div class="content">
            <p>Hi {{name}},</p>
            <p>We received a request to reset the password for your {{app_name}} account.</p>
            <p style="text-align: center; margin: 30px 0;">
                <a href="{{reset_url}}" class="button">Reset Password</a>
            </p>
            <p class="muted">
                Or copy and paste this link into your browser:<br>
                <a href="{{reset_url}}" class="link">{{reset_url}}</a>
            </p>
            <div class="notes">
                <strong>Security notice:</strong> if you didn't request a password reset, ignore this email. Your password will not change.
            </div>
        </div>"#;

pub(super) const PASSWORD_RESET_TEXT: &str = r#"Reset Your Password

Hi {{name}},

We received a request to reset the password for your {{app_name}} account.

Open the link below to choose a new password:

{{reset_url}}

SECURITY NOTICE: if you didn't request a password reset, ignore this email. Your password will not change."#;

pub(super) const ORDER_CONFIRMATION_HTML: &str = r#"        <div class="header">
            <h1>Thank You for Your Order</h1>
        </div>
        <div class="content">
            <p>Hi {{greeting_name}},</p>
            <p>We've received order <strong>#{{order_number}}</strong>, placed {{submitted_at}}. Here is your summary.</p>
            <table class="items">
                <tr><th>Item</th><th class="num">Qty</th><th class="num">Price</th><th class="num">Subtotal</th></tr>
{{items}}
            </table>
            <p class="total">Total: {{total}}</p>
            <div class="panel">
                <strong>Shipping to</strong><br>
                {{customer_name}}<br>
                {{street}}<br>
                {{city}}, {{state}} {{zip}}<br>
                {{country}}
            </div>
            <div class="panel">
                <strong>Contact</strong><br>
                Email: {{customer_email}}<br>
                Phone: {{customer_phone}}
            </div>
{{notes}}
            <p class="muted">Order reference: {{order_id}}</p>
            <p>We'll email you again when your order ships.</p>
        </div>"#;

pub(super) const ORDER_CONFIRMATION_TEXT: &str = r#"Thank You for Your Order

Hi {{greeting_name}},

We've received order #{{order_number}}, placed {{submitted_at}}.

ITEMS
{{items}}

TOTAL: {{total}}

SHIPPING TO
{{customer_name}}
{{street}}
{{city}}, {{state}} {{zip}}
{{country}}

CONTACT
Email: {{customer_email}}
Phone: {{customer_phone}}
{{notes}}
Order reference: {{order_id}}

We'll email you again when your order ships."#;

pub(super) const ORDER_NOTIFICATION_HTML: &str = r#"        <div class="header">
            <h1>New Order #{{order_number}}</h1>
        </div>
        <div class="content">
            <p>A new order was submitted {{submitted_at}}.</p>
            <div class="panel">
                <strong>Order</strong><br>
                Number: {{order_number}}<br>
                ID: {{order_id}}<br>
                Total: <strong>{{total}}</strong>
            </div>
            <div class="panel">
                <strong>Customer</strong><br>
                {{customer_name}}<br>
                <a href="mailto:{{customer_email}}" class="link">{{customer_email}}</a><br>
                Phone: {{customer_phone}}
            </div>
            <div class="panel">
                <strong>Ship to</strong><br>
                {{street}}<br>
                {{city}}, {{state}} {{zip}}<br>
                {{country}}
            </div>
            <table class="items">
                <tr><th>Item</th><th class="num">Qty</th><th class="num">Price</th><th class="num">Subtotal</th></tr>
{{items}}
            </table>
            <p class="total">Total: {{total}}</p>
{{notes}}
        </div>"#;

pub(super) const ORDER_NOTIFICATION_TEXT: &str = r#"New Order #{{order_number}}

Submitted: {{submitted_at}}

ORDER
Number: {{order_number}}
ID: {{order_id}}
Total: {{total}}

CUSTOMER
Name: {{customer_name}}
Email: {{customer_email}}
Phone: {{customer_phone}}

SHIP TO
{{street}}
{{city}}, {{state}} {{zip}}
{{country}}

ITEMS
{{items}}

TOTAL: {{total}}
{{notes}}"#;

pub(super) const CONTACT_NOTIFICATION_HTML: &str = r#"        <div class="header">
            <h1>New Contact Form Submission</h1>
        </div>
        <div class="content">
            <div class="panel">
                <strong>From:</strong> {{name}}<br>
                <strong>Email:</strong> <a href="mailto:{{email}}" class="link">{{email}}</a><br>
                <strong>Phone:</strong> {{phone}}<br>
                <strong>Subject:</strong> {{subject}}<br>
                <strong>Received:</strong> {{submitted_at}}
            </div>
            <p><strong>Message</strong></p>
            <p>{{message}}</p>
        </div>"#;

pub(super) const CONTACT_NOTIFICATION_TEXT: &str = r#"New Contact Form Submission

From: {{name}}
Email: {{email}}
Phone: {{phone}}
Subject: {{subject}}
Received: {{submitted_at}}

MESSAGE
{{message}}"#;

pub(super) const CONTACT_CONFIRMATION_HTML: &str = r#"        <div class="header">
            <h1>Thank You for Reaching Out</h1>
        </div>
        <div class="content">
            <p>Hi {{name}},</p>
            <p>Your message has reached us and we'll reply within two business days.</p>
            <div class="panel">
                <strong>{{subject}}</strong><br>
                {{message}}
            </div>
        </div>"#;

pub(super) const CONTACT_CONFIRMATION_TEXT: &str = r#"Thank You for Reaching Out

Hi {{name}},

Your message has reached us and we'll reply within two business days.

Your message ({{subject}}):
{{message}}"#;
