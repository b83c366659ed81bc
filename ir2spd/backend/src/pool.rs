use crate::constant::{format_float, format_int};
use ir2spd_ir::{Constant, FloatConst, Function, IntConst};
use ir2spd_utils::SpdResult;
use linked_hash_map::LinkedHashMap;

/// Prefix of hoisted integer constants.
pub const INT_PARAM_PREFIX: &str = "c_i";
/// Prefix of hoisted floating-point constants.
pub const FLOAT_PARAM_PREFIX: &str = "c_f";

/// The distinct constants used by a function, in order of first use.
///
/// Integers are identified by width and value, floats by kind and bit
/// pattern, so `-0.0` and `0.0` are distinct entries.
#[derive(Debug, Default, Clone)]
pub struct ConstantPool {
    ints: LinkedHashMap<IntConst, usize>,
    floats: LinkedHashMap<FloatConst, usize>,
}

impl ConstantPool {
    /// Collect the constant operands of every instruction of `func`.
    pub fn scan(func: &Function) -> Self {
        let mut pool = Self::default();
        for (_, instr) in func.instructions() {
            let operands = instr.kind.operands();
            for c in operands.into_iter().filter_map(|op| op.as_const()) {
                pool.insert(c);
            }
        }
        pool
    }

    /// Add `c` to the pool and return its index among constants of its
    /// class.
    pub fn insert(&mut self, c: &Constant) -> usize {
        fn add<K: std::hash::Hash + Eq + Copy>(
            map: &mut LinkedHashMap<K, usize>,
            key: &K,
        ) -> usize {
            if let Some(&idx) = map.get(key) {
                return idx;
            }
            let idx = map.len();
            map.insert(*key, idx);
            idx
        }
        match c {
            Constant::Int(c) => add(&mut self.ints, c),
            Constant::Float(c) => add(&mut self.floats, c),
        }
    }

    /// The parameter name of `c`, if it is in the pool.
    pub fn param_name(&self, c: &Constant) -> Option<String> {
        match c {
            Constant::Int(c) => self
                .ints
                .get(c)
                .map(|idx| format!("{INT_PARAM_PREFIX}{idx}")),
            Constant::Float(c) => self
                .floats
                .get(c)
                .map(|idx| format!("{FLOAT_PARAM_PREFIX}{idx}")),
        }
    }

    pub fn len(&self) -> usize {
        self.ints.len() + self.floats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(name, value)` of every constant: integers first, then floats.
    pub fn declarations(&self) -> SpdResult<Vec<(String, String)>> {
        let ints = self.ints.iter().map(|(c, idx)| {
            Ok((format!("{INT_PARAM_PREFIX}{idx}"), format_int(c)))
        });
        let floats = self.floats.iter().map(|(c, idx)| {
            Ok((format!("{FLOAT_PARAM_PREFIX}{idx}"), format_float(c)?))
        });
        ints.chain(floats).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir2spd_ir::{BinOp, Builder, FloatKind, Operand, Param, Program, Type};

    #[test]
    fn constants_are_deduplicated_in_first_use_order() {
        let mut prog = Program::new();
        let mut b = Builder::new(&mut prog);
        let dbl = Type::Float(FloatKind::Double);
        let f = b.declare("f", vec![Param::named("x", dbl)], dbl).unwrap();
        let mut fb = b.define(f);
        let x = fb.param(0);
        let a = fb.binary(BinOp::FMul, x, Operand::double(2.0));
        let a = fb.binary(BinOp::FAdd, a, Operand::double(-0.0));
        let a = fb.binary(BinOp::FSub, a, Operand::double(0.0));
        let a = fb.binary(BinOp::FMul, a, Operand::double(2.0));
        fb.ret(a);
        fb.finish();

        let pool = ConstantPool::scan(prog.get(f));
        assert_eq!(pool.len(), 3);
        assert_eq!(
            pool.param_name(&Operand::double(0.0).as_const().copied().unwrap()),
            Some("c_f2".to_string())
        );
        assert_eq!(
            pool.declarations().unwrap(),
            vec![
                ("c_f0".to_string(), "2.000000e+00".to_string()),
                ("c_f1".to_string(), "-0.000000e+00".to_string()),
                ("c_f2".to_string(), "0.000000e+00".to_string()),
            ]
        );
    }

    #[test]
    fn integers_of_different_widths_are_distinct() {
        let mut pool = ConstantPool::default();
        assert_eq!(pool.insert(&IntConst::new(32, 1).into()), 0);
        assert_eq!(pool.insert(&IntConst::new(8, 1).into()), 1);
        assert_eq!(pool.insert(&IntConst::new(32, 1).into()), 0);
        assert_eq!(pool.insert(&FloatConst::double(1.0).into()), 0);
        assert_eq!(
            pool.param_name(&IntConst::new(8, 1).into()).as_deref(),
            Some("c_i1")
        );
        assert_eq!(pool.len(), 3);
    }
}
