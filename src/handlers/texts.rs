//! Chat-facing message texts

/// Group rules, used both as the welcome message and by the rules command
pub const RULES: &str = "🔴 *Group Rules* 🔴

*[1]* Always be respectful. No insults, prejudice or offence.

*[2]* No spam. No flooding, irrelevant links or unauthorised advertising.

*[3]* Stay on the group's topic.

*[4]* No inappropriate content (pornography, extreme violence, anything illegal).

*[5]* Constructive discussion yes, fights no.

*[6]* Avoid fake news. Check before you share.

*[7]* Respect the admins and their decisions.

*[8]* Minimum age: 15+.

*[9]* No selling, services or gambling.

*[10]* Contact the admins only inside the group, never in private.

*[11]* APKs only from trusted sites without ads. Raw APKs are restricted to admins.

⚠️ *Breaking the rules = ban* ⚠️";

pub const PERMISSION_DENIED: &str = "❌ You are not allowed to use this command.

📝 Administrative commands require one of:
• Admin of this group
• Owner or admin configured in the bot
• Owner of the connected number";

pub fn kick_usage(prefix: &str) -> String {
    format!(
        "❌ You need to mention a user to remove.\nUsage: `{prefix}kick @user`\n\n💡 Mention the user (@) or reply to one of their messages."
    )
}

pub const BOT_NOT_IN_GROUP: &str =
    "❌ Could not find the bot among this group's participants. Try again in a few seconds.";

pub fn bot_not_admin(admins: &[String]) -> String {
    let list = crate::utils::helpers::bullet_list(admins.iter(), "   • none found");
    format!(
        "❌ The bot must be a group admin to remove users.\n\n👨‍💼 Please promote the bot. Current admins:\n{list}"
    )
}

pub fn removed(target_mention: &str) -> String {
    format!("✅ {target_mention} was removed from the group by the administrators.\n\n⚖️ Reason: administrative command")
}

pub const REMOVE_FORBIDDEN: &str = "❌ Failed to remove user.

🚫 The bot is not allowed to remove this user.
• Check that the bot is a group admin
• The user may be an admin who cannot be removed";

pub const REMOVE_NOT_FOUND: &str = "❌ Failed to remove user.

👻 User not found in the group or already removed.";

pub fn remove_failed(details: &str) -> String {
    format!(
        "❌ Failed to remove user.\n\n🔍 Technical details: {details}\n\n💡 Possible fixes:\n• Make sure the bot is an admin\n• Check the user is still in the group\n• Try again in a few seconds"
    )
}

/// Footer appended to help and rules while donations are enabled
pub fn donation_footer(message: &str, prefix: &str) -> String {
    format!("\n\n---\n💡 {message}\n❤️ Use `{prefix}pix` to support the project!")
}

pub fn donation(info: &crate::models::DonationInfo) -> String {
    format!(
        "💰 *Support the Bot*\n\n\
         🤖 *Why donate?*\n{message}\n\n\
         💸 *Monthly costs:*\n\
         • 🔋 Electricity around the clock\n\
         • 📱 Mobile internet\n\
         • ⚡ Maintenance and updates\n\n\
         📋 *PIX key:*\n`{key}`\n\n\
         1. Open your bank app\n\
         2. Choose PIX and paste the key\n\
         3. Pick any amount\n\n\
         🙏 Thank you for keeping the bot online!",
        message = info.message,
        key = info.pix_key,
    )
}

pub const DONATION_UNAVAILABLE: &str = "💝 Donations are not open right now. Thanks for the thought!";
