//! Help rendering
//!
//! Pure formatting over descriptors; the locale is chosen by the caller.

use crate::command::{CommandDescriptor, CommandGroup, HelpText};
use crate::locale::Locale;
use crate::registry::CommandRegistry;

/// Program name used in usage lines
pub const PROGRAM: &str = "ossctl";

/// Column width of the command name in catalog help
const NAME_WIDTH: usize = 20;

struct Headings {
    synopsis: &'static str,
    aliases: &'static str,
    syntax: &'static str,
    detail: &'static str,
    sample: &'static str,
    options: &'static str,
    usage: &'static str,
    more: &'static str,
}

const ENGLISH: Headings = Headings {
    synopsis: "SYNOPSIS",
    aliases: "ALIASES",
    syntax: "SYNTAX",
    detail: "DETAIL DESCRIPTION",
    sample: "SAMPLE",
    options: "OPTIONS",
    usage: "Usage: ossctl <command> [args...] [options...]",
    more: "Use `ossctl help <command>` for more information on a command.",
};

const CHINESE: Headings = Headings {
    synopsis: "概要",
    aliases: "别名",
    syntax: "语法",
    detail: "详细说明",
    sample: "示例",
    options: "选项",
    usage: "用法: ossctl 命令 [参数...] [选项...]",
    more: "使用 `ossctl help 命令` 查看命令的详细帮助。",
};

/// Renders descriptor help in one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpFormatter {
    locale: Locale,
}

impl HelpFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// One summary line for catalog help: name and synopsis
    pub fn format_whole(&self, descriptor: &CommandDescriptor) -> String {
        format!(
            "  {:<width$}{}\n",
            descriptor.name,
            self.text(descriptor).synopsis,
            width = NAME_WIDTH.max(descriptor.name.len() + 1)
        )
    }

    /// Full help for one command
    pub fn format_detail(&self, descriptor: &CommandDescriptor) -> String {
        let headings = self.headings();
        let text = self.text(descriptor);
        let mut out = String::new();

        section(&mut out, headings.synopsis, text.synopsis);
        if !descriptor.aliases.is_empty() {
            section(&mut out, headings.aliases, &descriptor.aliases.join(", "));
        }

        let usage = format!("{PROGRAM} {} {}", descriptor.name, text.param);
        let syntax = if text.syntax.trim().is_empty() {
            usage
        } else {
            format!("{usage}\n\n{}", text.syntax.trim_matches('\n'))
        };
        section(&mut out, headings.syntax, &syntax);
        section(&mut out, headings.detail, text.detail);
        section(&mut out, headings.sample, text.sample);

        if !descriptor.allowed_options.is_empty() {
            out.push_str(headings.options);
            out.push_str(":\n\n");
            for key in descriptor.allowed_options {
                let spec = key.spec();
                out.push_str(&format!("  {}\n", spec.usage()));
                out.push_str(&format!("        {}\n\n", spec.help(self.locale)));
            }
        }

        out
    }

    /// Usage line plus one block per command group
    pub fn format_catalog(&self, registry: &CommandRegistry) -> String {
        let headings = self.headings();
        let mut out = format!("{}\n\n", headings.usage);

        for group in CommandGroup::ALL {
            let lines: String = registry
                .descriptors()
                .filter(|d| d.group == group)
                .map(|d| self.format_whole(d))
                .collect();
            if lines.is_empty() {
                continue;
            }
            out.push_str(group_title(group, self.locale));
            out.push_str(":\n");
            out.push_str(&lines);
            out.push('\n');
        }

        out.push_str(headings.more);
        out.push('\n');
        out
    }

    fn text<'a>(&self, descriptor: &'a CommandDescriptor) -> &'a HelpText {
        const EMPTY: HelpText = HelpText {
            synopsis: "",
            param: "",
            syntax: "",
            detail: "",
            sample: "",
        };
        descriptor.help_text(self.locale).unwrap_or(&EMPTY)
    }

    fn headings(&self) -> &'static Headings {
        match self.locale {
            Locale::English => &ENGLISH,
            Locale::Chinese => &CHINESE,
        }
    }
}

fn group_title(group: CommandGroup, locale: Locale) -> &'static str {
    match (group, locale) {
        (CommandGroup::Normal, Locale::English) => "Commands",
        (CommandGroup::Additional, Locale::English) => "Additional Commands",
        (CommandGroup::Normal, Locale::Chinese) => "命令",
        (CommandGroup::Additional, Locale::Chinese) => "其他命令",
    }
}

/// Heading followed by the body indented four spaces
fn section(out: &mut String, heading: &str, body: &str) {
    let body = body.trim_matches('\n');
    if body.trim().is_empty() {
        return;
    }
    out.push_str(heading);
    out.push_str(":\n\n");
    for line in body.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out.push('\n');
}
