// Minimal stack machine used to check the behaviour of generated code.

use rustc_hash::FxHashMap;
use smc::InstructionList;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
}

impl Value {
    fn as_f64(self) -> f64 {
        match self {
            Value::Int(n) => n as f64,
            Value::Real(x) => x,
        }
    }

    fn as_address(self) -> usize {
        match self {
            Value::Int(n) => n as usize,
            Value::Real(x) => x as usize,
        }
    }

    fn is_true(self) -> bool {
        self.as_f64() != 0.0
    }

    fn render(self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Real(x) => x.to_string(),
        }
    }
}

fn arith(op: &str, a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Value::Int(match op {
            "+" => x + y,
            "-" => x - y,
            "*" => x * y,
            "/" => x / y,
            "%" => x % y,
            _ => unreachable!("{}", op),
        }),
        _ => {
            let (x, y) = (a.as_f64(), b.as_f64());
            Value::Real(match op {
                "+" => x + y,
                "-" => x - y,
                "*" => x * y,
                "/" => x / y,
                "%" => x % y,
                _ => unreachable!("{}", op),
            })
        }
    }
}

fn compare(op: &str, a: Value, b: Value) -> bool {
    let (x, y) = (a.as_f64(), b.as_f64());
    match op {
        "<" => x < y,
        "<=" => x <= y,
        ">" => x > y,
        ">=" => x >= y,
        "==" => x == y,
        "!=" => x != y,
        _ => unreachable!("{}", op),
    }
}

/// Run `program` and return everything it printed, one entry per `print`.
pub fn run(program: &InstructionList) -> Vec<String> {
    let lines = program.lines();

    let mut labels = FxHashMap::default();
    let mut addresses: FxHashMap<String, usize> = FxHashMap::default();
    let mut memory_size = 0;

    for (pc, line) in lines.iter().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["label", name] => {
                labels.insert(name.trim_end_matches(':').to_string(), pc);
            }
            ["array", name, _, size] => {
                addresses.insert(name.to_string(), memory_size);
                memory_size += size.parse::<usize>().unwrap();
            }
            _ => {}
        }
    }
    for line in &lines {
        if let ["push", operand] = line.split_whitespace().collect::<Vec<_>>().as_slice() {
            let is_name = operand.chars().next().is_some_and(|c| !c.is_ascii_digit());
            if is_name && !addresses.contains_key(*operand) {
                addresses.insert(operand.to_string(), memory_size);
                memory_size += 1;
            }
        }
    }

    let mut memory = vec![Value::Int(0); memory_size];
    let mut stack: Vec<Value> = Vec::new();
    let mut output = Vec::new();
    let mut pc = 0;
    let mut steps = 0;

    while pc < lines.len() {
        steps += 1;
        assert!(steps < 1_000_000, "program did not terminate");

        let parts: Vec<&str> = lines[pc].split_whitespace().collect();
        pc += 1;

        match parts.as_slice() {
            ["push", operand] => {
                let value = if let Some(addr) = addresses.get(*operand) {
                    Value::Int(*addr as i64)
                } else if operand.contains('.') {
                    Value::Real(operand.parse().unwrap())
                } else {
                    Value::Int(operand.parse().unwrap())
                };
                stack.push(value);
            }
            ["load"] => {
                let addr = stack.pop().unwrap().as_address();
                stack.push(memory[addr]);
            }
            ["store"] => {
                let value = stack.pop().unwrap();
                let addr = stack.pop().unwrap().as_address();
                memory[addr] = value;
            }
            ["print"] => output.push(stack.pop().unwrap().render()),
            ["!"] => {
                let value = stack.pop().unwrap();
                stack.push(Value::Int(!value.is_true() as i64));
            }
            [op @ ("+" | "-" | "*" | "/" | "%")] => {
                let b = stack.pop().unwrap();
                let a = stack.pop().unwrap();
                stack.push(arith(op, a, b));
            }
            [op @ ("<" | "<=" | ">" | ">=" | "==" | "!=")] => {
                let b = stack.pop().unwrap();
                let a = stack.pop().unwrap();
                stack.push(Value::Int(compare(op, a, b) as i64));
            }
            [op @ ("&&" | "||")] => {
                let b = stack.pop().unwrap().is_true();
                let a = stack.pop().unwrap().is_true();
                let result = if *op == "&&" { a && b } else { a || b };
                stack.push(Value::Int(result as i64));
            }
            ["goto", "label", name] => pc = labels[*name],
            ["gofalse", "label", name] => {
                if !stack.pop().unwrap().is_true() {
                    pc = labels[*name];
                }
            }
            ["label", _] | ["array", ..] => {}
            ["halt"] => break,
            other => panic!("unknown instruction {:?}", other),
        }
    }

    output
}
