use ir2spd_ir::{Function, ValueId};
use std::collections::{HashMap, HashSet};

/// Prefix of formal parameters, which become input ports.
pub const INPUT_PREFIX: &str = "i_";
/// Prefix of instruction results, which become internal signals.
pub const TEMP_PREFIX: &str = "t_";

/// Assigns textual names to the values of one function.
///
/// Named values keep their name behind the prefix of their category. Unnamed
/// values get a sequential alias on first request which is reused for every
/// later request of the same value. A name that starts with a digit, or that
/// was already given to another value, is replaced by an alias so that no two
/// values share a name. Names are only meaningful within one function: a
/// namer must not be reused across functions.
#[derive(Debug, Default)]
pub struct ValueNamer {
    names: HashMap<ValueId, String>,
    taken: HashSet<String>,
    aliases: HashMap<ValueId, u32>,
    next: u32,
}

impl ValueNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The name of `value`, which must belong to `func`.
    pub fn name(&mut self, func: &Function, value: ValueId) -> String {
        if let Some(name) = self.names.get(&value) {
            return name.clone();
        }
        let prefix = match value {
            ValueId::Arg(_) => INPUT_PREFIX,
            ValueId::Inst(_) => TEMP_PREFIX,
        };
        let name = func
            .value_name(value)
            .filter(|n| !n.as_str().starts_with(|c: char| c.is_ascii_digit()))
            .map(|n| format!("{prefix}{n}"))
            .filter(|n| !self.taken.contains(n))
            .unwrap_or_else(|| format!("{prefix}{}", self.alias(value)));
        self.taken.insert(name.clone());
        self.names.insert(value, name.clone());
        name
    }

    /// The numeric alias of `value`, assigned on first request.
    pub fn alias(&mut self, value: ValueId) -> u32 {
        *self.aliases.entry(value).or_insert_with(|| {
            let alias = self.next;
            self.next += 1;
            alias
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir2spd_ir::{BinOp, Builder, Operand, Param, Program, Type};

    fn id(op: Operand) -> ValueId {
        match op {
            Operand::Value(v) => v,
            Operand::Const(_) => unreachable!(),
        }
    }

    #[test]
    fn aliases_are_stable_and_distinct() {
        let mut prog = Program::new();
        let mut b = Builder::new(&mut prog);
        let params = vec![
            Param::named("x", Type::Int(8)),
            Param::unnamed(Type::Int(8)),
        ];
        let f = b.declare("f", params, Type::Int(8)).unwrap();
        let mut fb = b.define(f);
        let (x, y) = (fb.param(0), fb.param(1));
        let s = fb.binary(BinOp::Add, x, y);
        let p = fb.named_binary("prod", BinOp::Mul, s, y);
        let q = fb.binary(BinOp::Sub, p, s);
        fb.ret(q);
        fb.finish();

        let func = prog.get(f);
        let mut namer = ValueNamer::new();
        assert_eq!(namer.name(func, id(x)), "i_x");
        assert_eq!(namer.name(func, id(y)), "i_0");
        assert_eq!(namer.name(func, id(s)), "t_1");
        assert_eq!(namer.name(func, id(p)), "t_prod");
        assert_eq!(namer.name(func, id(q)), "t_2");
        assert_eq!(namer.name(func, id(s)), "t_1");
        assert_eq!(namer.name(func, id(y)), "i_0");
    }

    #[test]
    fn clashing_names_fall_back_to_aliases() {
        let mut prog = Program::new();
        let mut b = Builder::new(&mut prog);
        let int = Type::Int(32);
        let params = vec![Param::unnamed(int), Param::named("0", int)];
        let f = b.declare("f", params, int).unwrap();
        let mut fb = b.define(f);
        let (p0, p1) = (fb.param(0), fb.param(1));
        let a = fb.named_binary("tmp", BinOp::Sub, p0, p1);
        let c = fb.named_binary("tmp", BinOp::Mul, a, p1);
        let d = fb.named_binary("7", BinOp::Add, c, a);
        fb.ret(d);
        fb.finish();

        let func = prog.get(f);
        let mut namer = ValueNamer::new();
        let names: Vec<_> = [p0, p1, a, c, d]
            .into_iter()
            .map(|v| namer.name(func, id(v)))
            .collect();
        assert_eq!(names, ["i_0", "i_1", "t_tmp", "t_2", "t_3"]);
        assert_eq!(namer.name(func, id(c)), "t_2");
    }
}
