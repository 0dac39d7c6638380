//! # Pattern tour: adapter, bridge, composite, template method
//!
//! ## Run
//! ```bash
//! cargo run --example patterns
//! ```

use patternbus::patterns::{
    adapter::{PayType, Payment, PaymentAdapter},
    bridge::{Blue, Crown, Crystal, Gift, Plane, Red},
    composite::{LevelTree, PersonLevel},
    template::DocProcessor,
};

fn main() -> anyhow::Result<()> {
    println!("== adapter");
    let target = PaymentAdapter::standard();
    for name in ["weixin", "alipay"] {
        let pay: PayType = name.parse()?;
        println!("{}", target.deal(pay, 99));
    }

    println!("== bridge");
    let gifts: Vec<Box<dyn Gift>> = vec![
        Box::new(Crown::new(Blue, Some(Box::new(Crystal)))),
        Box::new(Plane::new(Red, None)),
    ];
    for g in &gifts {
        for line in g.send() {
            println!("{line}");
        }
    }

    println!("== composite");
    let mut tree = LevelTree::new(PersonLevel::new("top officials", "upper", 1_000_000_000));
    let root = tree.root();
    let middle = tree.add(root, PersonLevel::new("middle officials", "upper-middle", 10_000_000))?;
    let managers = tree.add(root, PersonLevel::new("corporate managers", "upper-middle", 10_000_000))?;
    let owners = tree.add(middle, PersonLevel::new("small business owner", "middle", 10_000))?;
    tree.add(managers, PersonLevel::new("clerks", "middle", 10_000))?;
    tree.add(owners, PersonLevel::new("programmers", "lower-middle", 1_000))?;
    for (depth, level) in tree.walk() {
        println!("{}{level}", "  ".repeat(depth));
    }

    println!("== template method");
    for doc in [DocProcessor::local(), DocProcessor::net()] {
        println!("{}", doc.operate());
    }
    Ok(())
}
