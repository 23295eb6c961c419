//! Property-based tests for tree shape and name lookup

use bctx::{BlankDocument, BrowsingContext, Configuration, Sandbox, SandboxFlag};
use proptest::prelude::*;
use std::rc::Rc;

/// A tree of framed contexts, each embedded in its parent's document.
struct Tree {
    contexts: Vec<Rc<BrowsingContext>>,
    _documents: Vec<Rc<BlankDocument>>,
}

/// `parents[i]` picks the parent of context `i + 1` among the earlier ones.
fn build_tree(parents: &[usize]) -> Tree {
    let root = BrowsingContext::new(Configuration::new(), Sandbox::NONE);
    let root_document = Rc::new(BlankDocument::for_context(&root));
    root.navigate(root_document.clone());

    let mut contexts = vec![root];
    let mut documents = vec![root_document];
    for (i, pick) in parents.iter().enumerate() {
        let parent_index = pick % contexts.len();
        let child = contexts[parent_index].create_named_child(
            &format!("n{}", i + 1),
            Sandbox::NONE,
            true,
        );
        documents[parent_index].attach(child.clone());

        let document = Rc::new(BlankDocument::for_context(&child));
        child.navigate(document.clone());
        contexts.push(child);
        documents.push(document);
    }

    Tree {
        contexts,
        _documents: documents,
    }
}

/// Parent chains are finite and always end at the root.
#[test]
fn test_parent_chain_terminates_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(any::<usize>(), 0..40), |parents| {
            let tree = build_tree(&parents);
            let root = &tree.contexts[0];

            for (i, context) in tree.contexts.iter().enumerate() {
                let depth = context.ancestors().count();
                assert!(depth <= i);
                assert!(Rc::ptr_eq(&context.top(), root));
                assert!(Rc::ptr_eq(context.group(), root.group()));
            }

            Ok(())
        })
        .unwrap();
}

/// Every named frame of a connected tree is reachable from every context.
#[test]
fn test_every_frame_reachable_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(any::<usize>(), 1..30),
                any::<usize>(),
                any::<usize>(),
            ),
            |(parents, from, target)| {
                let tree = build_tree(&parents);
                let count = tree.contexts.len();
                let from = &tree.contexts[from % count];
                // Context 0 is the unnamed root.
                let target_index = 1 + target % (count - 1);
                let target = &tree.contexts[target_index];

                let found = from.find_child(&format!("n{}", target_index));
                prop_assert!(found.is_some());
                prop_assert!(Rc::ptr_eq(&found.unwrap(), target));
                prop_assert!(from.find_child("absent").is_none());

                Ok(())
            },
        )
        .unwrap();
}

/// A sandbox built from flags contains exactly those flags.
#[test]
fn test_sandbox_membership_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(0..SandboxFlag::ALL.len(), 0..8),
            |indices| {
                let chosen: Vec<SandboxFlag> =
                    indices.iter().map(|i| SandboxFlag::ALL[*i]).collect();
                let sandbox: Sandbox = chosen.iter().copied().collect();

                for flag in SandboxFlag::ALL {
                    prop_assert_eq!(sandbox.contains(flag), chosen.contains(&flag));
                }
                prop_assert_eq!(sandbox.is_empty(), chosen.is_empty());
                prop_assert_eq!(sandbox.to_string().parse::<Sandbox>(), Ok(sandbox));

                Ok(())
            },
        )
        .unwrap();
}
