use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::calendar::MonthIndex;
use crate::error::{Error, ErrorKind};

pub type ActionResult = Result<(), Error>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "next",
        Action::Repeatable(|c, n| c.navigate(i64::from(n))),
    ),
    (
        "prev",
        Action::Repeatable(|c, n| c.navigate(-i64::from(n))),
    ),
    (
        "goto",
        Action::Arg(|c, arg| c.jump_to(arg.parse::<MonthIndex>()?)),
    ),
    (
        "select",
        Action::Arg(|c, arg| {
            let day = arg.trim().parse::<u32>().map_err(|_| {
                Error::new(
                    ErrorKind::CommandParse,
                    &format!("'{}' is not a day number", arg),
                )
            })?;
            c.select_day(day)
        }),
    ),
    (
        "today",
        Action::NoArg(|c| c.goto_today()),
    ),
    (
        "show",
        Action::NoArg(|c| {
            if c.confirm() {
                Ok(())
            } else {
                Err(Error::new(ErrorKind::InvalidDate, "no day selected"))
            }
        }),
    ),
    (
        "close",
        Action::NoArg(|c| {
            c.dismiss();
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.request_quit();
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.request_quit();
            Ok(())
        }),
    ),
];

/// `[count]name[ argument]`
fn parse_command(input: &str) -> IResult<&str, (Option<u32>, &str, Option<&str>)> {
    all_consuming(tuple((
        opt(map_res(digit1, |digits: &str| digits.parse::<u32>())),
        alpha1,
        opt(preceded(space1, rest)),
    )))(input)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let (_, (repeat, name, arg)) = parse_command(cmd.trim())?;

        let (_, act) = COMMANDS
            .iter()
            .find(|(cmd_name, _)| *cmd_name == name)
            .ok_or_else(|| {
                Error::new(ErrorKind::CommandParse, &format!("Unknown command '{}'", name))
            })?;

        log::debug!("Running command '{}'", cmd);

        match (act, repeat, arg) {
            (Action::Repeatable(a), repeat, None) => a(self.context, repeat.unwrap_or(1)),
            (Action::Arg(a), None, Some(arg)) => a(self.context, arg),
            (Action::NoArg(a), None, None) => a(self.context),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("Invalid use of '{}'", name),
            )),
        }
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.input_sink_mut().finish_line().to_owned();
            let result = self.run_command(&cmd);
            if result.is_ok() {
                self.context.mode = Mode::Normal;
            }
            self.context.report(result);
            None
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::items::DummyItems;
    use chrono::Month;

    fn context() -> Context {
        Context::new(&Config::default(), Box::new(DummyItems))
            .unwrap()
            .with_month(MonthIndex::new(Month::November, 2024))
    }

    #[test]
    fn repeated_navigation() {
        let mut ctx = context();
        CommandParser::new(&mut ctx).run_command("3next").unwrap();
        assert_eq!(ctx.reference(), MonthIndex::new(Month::February, 2025));

        CommandParser::new(&mut ctx).run_command("prev").unwrap();
        assert_eq!(ctx.reference(), MonthIndex::new(Month::January, 2025));
    }

    #[test]
    fn select_then_show_then_close() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);

        assert!(parser.run_command("show").is_err());
        parser.run_command("select 30").unwrap();
        parser.run_command(" show ").unwrap();
        assert!(ctx.panel().is_visible());

        CommandParser::new(&mut ctx).run_command("close").unwrap();
        assert!(!ctx.panel().is_visible());
        assert_eq!(ctx.selection().day(), 30);
    }

    #[test]
    fn goto_clears_selection() {
        let mut ctx = context();
        ctx.select_day(2).unwrap();
        CommandParser::new(&mut ctx).run_command("goto 2024-03").unwrap();

        assert_eq!(ctx.reference(), MonthIndex::new(Month::March, 2024));
        assert_eq!(ctx.selection().day(), 0);
    }

    #[test]
    fn rejects_bad_commands() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);

        assert!(parser.run_command("frobnicate").is_err());
        assert!(parser.run_command("select 31").is_err());
        assert!(parser.run_command("select x").is_err());
        assert!(parser.run_command("goto soon").is_err());
        assert!(parser.run_command("next 5").is_err());
        assert!(parser.run_command("2goto 2024-01").is_err());
        assert!(parser.run_command("").is_err());
        assert_eq!(ctx.reference(), MonthIndex::new(Month::November, 2024));
    }

    #[test]
    fn huge_repeat_counts_are_refused() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);

        assert!(parser.run_command("2147483648prev").is_err());
        assert!(parser.run_command("4294967295next").is_err());
        assert!(parser.run_command("9999999next").is_err());
        assert!(parser.run_command("2147483647prev").is_err());
        assert_eq!(ctx.reference(), MonthIndex::new(Month::November, 2024));

        CommandParser::new(&mut ctx).run_command("24next").unwrap();
        assert_eq!(ctx.reference(), MonthIndex::new(Month::November, 2026));
    }

    #[test]
    fn failed_command_keeps_prompt_open() {
        let mut ctx = context();
        ctx.mode = Mode::Command;

        let enter = Input {
            event: Event::Key(Key::Char('\n')),
            raw: vec![],
        };
        assert!(CommandParser::new(&mut ctx).input(enter).is_none());
        assert_eq!(ctx.mode, Mode::Command);
        assert!(ctx.last_error_message.is_some());
    }

    #[test]
    fn quit() {
        let mut ctx = context();
        CommandParser::new(&mut ctx).run_command("q").unwrap();
        assert!(ctx.should_quit());
    }
}
